//! # CRD Generator
//!
//! Prints every Dynatrace provider CRD as a multi-document YAML stream.
//!
//! ```bash
//! cargo run -p crds --bin crdgen > config/crds/dynatrace.yaml
//! cargo run -p crds --bin crdgen | kubectl apply -f -
//! ```

use crds::{AutoTag, Email, Profile, ProviderConfig, Slack};
use kube::core::CustomResourceExt;

fn main() {
    let crds = [
        ProviderConfig::crd(),
        Profile::crd(),
        Email::crd(),
        Slack::crd(),
        AutoTag::crd(),
    ];

    for crd in &crds {
        match serde_yaml::to_string(crd) {
            Ok(yaml) => {
                println!("---");
                print!("{}", yaml);
            }
            Err(e) => {
                eprintln!("Failed to serialize CRD {} to YAML: {}", crd.metadata.name.as_deref().unwrap_or("<unnamed>"), e);
                std::process::exit(1);
            }
        }
    }
}
