//! AutoTag -> `builtin:tags.auto-tagging`
//!
//! Only `ME` rules carry an attribute rule; `SELECTOR` rules rely on the
//! entity selector alone.

use super::{ManagedKind, wire_name};
use crds::{AutoTag, AutoTagParameters, Rule, RuleCondition, RuleType};
use dynatrace_client::models::autotagging as dto;

impl ManagedKind for AutoTag {
    type Dto = dto::AutoTag;
    const KIND: &'static str = "AutoTag";

    fn to_dto(&self) -> dto::AutoTag {
        autotag_to_dto(&self.spec.for_provider)
    }
}

pub fn autotag_to_dto(p: &AutoTagParameters) -> dto::AutoTag {
    dto::AutoTag {
        name: p.name.clone(),
        description: p.description.clone(),
        rules: p.rules.iter().map(rule).collect(),
    }
}

fn rule(r: &Rule) -> dto::Rule {
    let attribute_rule = match r.rule_type {
        RuleType::Me => Some(dto::AttributeRule {
            entity_type: r.applies_to.clone(),
            conditions: r.conditions.iter().map(condition).collect(),
            service_to_host_propagation: r.service_to_host_propagation,
            service_to_pg_propagation: r.service_to_pg_propagation.or(r.service_to_pg_propagation_legacy),
            host_to_pg_propagation: r.host_to_pg_propagation,
            pg_to_host_propagation: r.pg_to_host_propagation,
            pg_to_service_propagation: r.pg_to_service_propagation,
            azure_to_pg_propagation: r.azure_to_pg_propagation,
            azure_to_service_propagation: r.azure_to_service_propagation,
        }),
        RuleType::Selector => None,
    };

    dto::Rule {
        enabled: r.enabled,
        rule_type: wire_name(&r.rule_type),
        value_format: r.value.clone(),
        value_normalization: wire_name(&r.tag_value_normalization),
        entity_selector: r.entity_selector.clone(),
        attribute_rule,
    }
}

fn condition(c: &RuleCondition) -> dto::AttributeCondition {
    dto::AttributeCondition {
        key: c.property.clone(),
        operator: c.operator.clone(),
        case_sensitive: c.case_sensitive,
        dynamic_key: c.dynamic_key.clone(),
        dynamic_key_source: c.dynamic_key_source.clone(),
        entity_id: c.entity_id.clone(),
        enum_value: c.enum_value.clone(),
        integer_value: c.integer_value,
        string_value: c.string_value.clone(),
        tag: c.tag.clone(),
    }
}
