//! Profile -> `builtin:alerting.profile`

use super::{ManagedKind, wire_name};
use crds::{
    CustomEventFilter, EventFilter, MetadataFilter, Profile, ProfileParameters, SeverityRule, TextFilter,
};
use dynatrace_client::models::alerting as dto;

impl ManagedKind for Profile {
    type Dto = dto::Profile;
    const KIND: &'static str = "Profile";

    fn to_dto(&self) -> dto::Profile {
        profile_to_dto(&self.spec.for_provider)
    }
}

pub fn profile_to_dto(p: &ProfileParameters) -> dto::Profile {
    dto::Profile {
        name: p.name.clone(),
        management_zone: p.management_zone.clone(),
        severity_rules: p.severity_rules.iter().map(severity_rule).collect(),
        event_filters: p.event_filters.iter().map(event_filter).collect(),
        legacy_id: None,
    }
}

fn severity_rule(r: &SeverityRule) -> dto::SeverityRule {
    dto::SeverityRule {
        severity_level: wire_name(&r.severity_level),
        delay_in_minutes: r.delay_in_minutes,
        tag_filter_include_mode: wire_name(&r.tag_filter_include_mode),
        tag_filter: r.tags.clone(),
    }
}

fn event_filter(f: &EventFilter) -> dto::EventFilter {
    dto::EventFilter {
        filter_type: wire_name(&f.filter_type),
        predefined_filter: f.predefined.as_ref().map(|p| dto::PredefinedEventFilter {
            event_type: wire_name(&p.event_type),
            negate: p.negate,
        }),
        custom_filter: f.custom.as_ref().map(custom_filter),
    }
}

fn custom_filter(c: &CustomEventFilter) -> dto::CustomEventFilter {
    dto::CustomEventFilter {
        title_filter: c.title.as_ref().map(text_filter),
        description_filter: c.description.as_ref().map(text_filter),
        metadata_filter: c.metadata_filter.as_ref().map(metadata_filter),
    }
}

fn text_filter(t: &TextFilter) -> dto::TextFilter {
    dto::TextFilter {
        operator: wire_name(&t.operator),
        value: t.value.clone(),
        negate: t.negate,
        enabled: t.enabled,
        case_sensitive: t.case_sensitive,
    }
}

fn metadata_filter(m: &MetadataFilter) -> dto::MetadataFilter {
    dto::MetadataFilter {
        metadata_filter_items: m
            .metadata_filter_items
            .iter()
            .map(|i| dto::MetadataFilterItem {
                metadata_key: i.metadata_key.clone(),
                metadata_value: i.metadata_value.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::*;

    #[test]
    fn test_profile_maps_rules_and_filters_in_order() {
        let params = ProfileParameters {
            name: "prod-alerts".to_string(),
            management_zone: Some("mz-1".to_string()),
            severity_rules: vec![
                SeverityRule {
                    severity_level: SeverityLevel::Availability,
                    delay_in_minutes: 0,
                    tag_filter_include_mode: TagFilterIncludeMode::None,
                    tags: vec![],
                },
                SeverityRule {
                    severity_level: SeverityLevel::Errors,
                    delay_in_minutes: 10,
                    tag_filter_include_mode: TagFilterIncludeMode::IncludeAny,
                    tags: vec!["env:prod".to_string()],
                },
            ],
            event_filters: vec![
                EventFilter {
                    filter_type: EventFilterType::Predefined,
                    predefined: Some(PredefinedEventFilter { event_type: EventType::CpuSaturation, negate: true }),
                    custom: None,
                },
                EventFilter {
                    filter_type: EventFilterType::Custom,
                    predefined: None,
                    custom: Some(CustomEventFilter {
                        title: Some(TextFilter {
                            operator: TextOperator::Contains,
                            value: "payment".to_string(),
                            negate: false,
                            enabled: true,
                            case_sensitive: false,
                        }),
                        description: None,
                        metadata_filter: Some(MetadataFilter {
                            metadata_filter_items: vec![MetadataFilterItem {
                                metadata_key: "dt.event.source".to_string(),
                                metadata_value: "k8s".to_string(),
                            }],
                        }),
                    }),
                },
            ],
        };

        let dto = profile_to_dto(&params);
        assert_eq!(dto.name, "prod-alerts");
        assert_eq!(dto.management_zone.as_deref(), Some("mz-1"));
        assert_eq!(dto.severity_rules[0].severity_level, "AVAILABILITY");
        assert_eq!(dto.severity_rules[1].tag_filter_include_mode, "INCLUDE_ANY");
        assert_eq!(dto.severity_rules[1].tag_filter, vec!["env:prod".to_string()]);

        let predefined = dto.event_filters[0].predefined_filter.as_ref().unwrap();
        assert_eq!(dto.event_filters[0].filter_type, "PREDEFINED");
        assert_eq!(predefined.event_type, "OSI_HIGH_CPU");
        assert!(predefined.negate);

        let custom = dto.event_filters[1].custom_filter.as_ref().unwrap();
        assert_eq!(custom.title_filter.as_ref().unwrap().operator, "CONTAINS");
        assert!(custom.description_filter.is_none());
        assert_eq!(custom.metadata_filter.as_ref().unwrap().metadata_filter_items[0].metadata_value, "k8s");
        assert!(dto.legacy_id.is_none());
    }

    #[test]
    fn test_minimal_profile() {
        let dto = profile_to_dto(&ProfileParameters { name: "p".to_string(), ..Default::default() });
        assert!(dto.severity_rules.is_empty());
        assert!(dto.event_filters.is_empty());
        assert!(dto.management_zone.is_none());
    }
}
