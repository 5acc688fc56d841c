//! Helpers for inspecting generated CRD schemas in tests

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps, JSONSchemaPropsOrArray,
};

fn child<'a>(schema: &'a JSONSchemaProps, name: &str) -> Option<&'a JSONSchemaProps> {
    // Arrays are walked through to their item schema
    let object = match &schema.items {
        Some(JSONSchemaPropsOrArray::Schema(items)) => items.as_ref(),
        _ => schema,
    };
    object.properties.as_ref()?.get(name)
}

/// Schema of `spec.forProvider.<path...>` in the first served version
pub fn for_provider_property<'a>(crd: &'a CustomResourceDefinition, path: &[&str]) -> Option<&'a JSONSchemaProps> {
    let root = crd.spec.versions.first()?.schema.as_ref()?.open_api_v3_schema.as_ref()?;
    let mut schema = child(child(root, "spec")?, "forProvider")?;
    for name in path {
        schema = child(schema, name)?;
    }
    Some(schema)
}
