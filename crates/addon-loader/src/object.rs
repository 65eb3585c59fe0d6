//! Addon object model
//!
//! [`CommonObject`] is the capability the loader needs from an addon: a
//! component name and a [`CommonSpec`]. [`Object`] is the type-erased boundary
//! for callers that hold arbitrary resources; the loader checks at runtime
//! whether such an object is an addon.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Version and channel fields shared by every addon spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonSpec {
    /// Explicit version id. Empty means "resolve via channel".
    #[serde(default)]
    pub version: String,
    /// Channel to resolve against. Empty means the default channel.
    #[serde(default)]
    pub channel: String,
}

/// Capability required of addon objects.
pub trait CommonObject: Send + Sync {
    /// Component whose manifests this addon deploys.
    fn component_name(&self) -> &str;

    fn common_spec(&self) -> &CommonSpec;
}

/// A resource of any kind, possibly an addon.
pub trait Object: Send + Sync {
    fn kind(&self) -> &str;

    /// Concrete Rust type name, used in type-mismatch errors.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The addon view of this object, if it is one.
    fn as_common_object(&self) -> Option<&dyn CommonObject> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonSpec {
    /// Overrides the component name derived from the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(flatten)]
    pub common: CommonSpec,
}

/// A declarative addon resource.
///
/// ```text
/// apiVersion: addons.example.org/v1alpha1
/// kind: Nginx
/// metadata:
///   name: web
/// spec:
///   channel: stable
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAddon")]
pub struct Addon {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: AddonSpec,
    #[serde(skip)]
    component: String,
}

// Wire shape of an addon; every deserialization goes through `From` so the
// component name is always derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddon {
    #[serde(default)]
    api_version: String,
    kind: String,
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    spec: AddonSpec,
}

impl From<RawAddon> for Addon {
    fn from(raw: RawAddon) -> Self {
        let mut addon = Self {
            api_version: raw.api_version,
            kind: raw.kind,
            metadata: raw.metadata,
            spec: raw.spec,
            component: String::new(),
        };
        addon.component = addon.derive_component();
        addon
    }
}

impl Addon {
    pub fn new(kind: impl Into<String>, spec: CommonSpec) -> Self {
        let mut addon = Self {
            api_version: String::new(),
            kind: kind.into(),
            metadata: ObjectMeta::default(),
            spec: AddonSpec {
                component_name: None,
                common: spec,
            },
            component: String::new(),
        };
        addon.component = addon.derive_component();
        addon
    }

    /// Set an explicit component name instead of the lowercased kind.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.spec.component_name = Some(component.into());
        self.component = self.derive_component();
        self
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(Error::AddonParse)
    }

    fn derive_component(&self) -> String {
        match &self.spec.component_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.kind.to_lowercase(),
        }
    }
}

impl CommonObject for Addon {
    fn component_name(&self) -> &str {
        &self.component
    }

    fn common_spec(&self) -> &CommonSpec {
        &self.spec.common
    }
}

impl Object for Addon {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn as_common_object(&self) -> Option<&dyn CommonObject> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConfigMap;

    impl Object for ConfigMap {
        fn kind(&self) -> &str {
            "ConfigMap"
        }
    }

    #[test]
    fn component_defaults_to_lowercased_kind() {
        let addon = Addon::new("Nginx", CommonSpec::default());
        assert_eq!(addon.component_name(), "nginx");
    }

    #[test]
    fn component_override_wins() {
        let addon = Addon::new("Nginx", CommonSpec::default()).with_component("nginx-ingress");
        assert_eq!(addon.component_name(), "nginx-ingress");
    }

    #[test]
    fn from_yaml_reads_spec_fields() {
        let addon = Addon::from_yaml(
            r#"apiVersion: addons.example.org/v1alpha1
kind: Dashboard
metadata:
  name: dash
  namespace: kube-system
spec:
  version: 1.2.3
  channel: beta
"#,
        )
        .unwrap();

        assert_eq!(addon.component_name(), "dashboard");
        assert_eq!(addon.common_spec().version, "1.2.3");
        assert_eq!(addon.common_spec().channel, "beta");
        assert_eq!(addon.metadata.namespace.as_deref(), Some("kube-system"));
    }

    #[test]
    fn from_yaml_without_spec_has_empty_fields() {
        let addon = Addon::from_yaml("kind: Nginx\n").unwrap();
        assert!(addon.common_spec().version.is_empty());
        assert!(addon.common_spec().channel.is_empty());
    }

    #[test]
    fn from_yaml_honours_component_name() {
        let addon =
            Addon::from_yaml("kind: Web\nspec:\n  componentName: nginx\n").unwrap();
        assert_eq!(addon.component_name(), "nginx");
    }

    #[test]
    fn plain_deserialize_derives_component() {
        let addon: Addon =
            serde_yaml::from_str("kind: Nginx\nspec:\n  version: 1.2.3\n").unwrap();
        assert_eq!(addon.component_name(), "nginx");
        assert_eq!(addon.common_spec().version, "1.2.3");

        let value = serde_yaml::to_value(&addon).unwrap();
        let back: Addon = serde_yaml::from_value(value).unwrap();
        assert_eq!(back.component_name(), "nginx");
    }

    #[test]
    fn from_yaml_without_kind_fails() {
        let err = Addon::from_yaml("spec:\n  version: 1.0.0\n").unwrap_err();
        assert!(matches!(err, Error::AddonParse(_)));
    }

    #[test]
    fn non_addon_has_no_common_view() {
        let object: &dyn Object = &ConfigMap;
        assert!(object.as_common_object().is_none());
        assert!(object.type_name().ends_with("ConfigMap"));
    }
}
