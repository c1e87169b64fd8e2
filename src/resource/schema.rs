//! Attribute schema of the token resource.

use crate::staleness::STALENESS_DESCRIPTION;

pub const EXPIRES: &str = "expires";
pub const TOKEN: &str = "token";
pub const REFRESH_TOKEN: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Int64,
    String,
}

#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub description: &'static str,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Descriptions of the plan modifiers attached to this attribute.
    pub plan_modifiers: Vec<&'static str>,
}

impl AttributeSchema {
    fn computed(name: &'static str, kind: AttributeKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            optional: true,
            computed: true,
            sensitive: false,
            plan_modifiers: vec![STALENESS_DESCRIPTION],
        }
    }

    fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub description: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Schema of the token refresh resource.
pub fn token_resource_schema() -> Schema {
    Schema {
        description: "Slack Token Refresh resource",
        attributes: vec![
            AttributeSchema::computed(EXPIRES, AttributeKind::Int64, "Next refresh time."),
            AttributeSchema::computed(TOKEN, AttributeKind::String, "Current API token.")
                .sensitive(),
            AttributeSchema::computed(
                REFRESH_TOKEN,
                AttributeKind::String,
                "Current refresh token.",
            )
            .sensitive(),
        ],
    }
}
