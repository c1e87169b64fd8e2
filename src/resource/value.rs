//! Host attribute values.

/// An attribute value as the host sees it during planning and apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue<T> {
    /// Not set.
    Null,
    /// Will be computed during apply.
    Unknown,
    Known(T),
}

impl<T> Default for AttributeValue<T> {
    fn default() -> Self {
        AttributeValue::Null
    }
}

impl<T> AttributeValue<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AttributeValue::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, AttributeValue::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            AttributeValue::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_known(self) -> Option<T> {
        match self {
            AttributeValue::Known(v) => Some(v),
            _ => None,
        }
    }

    /// Replace a null value with unknown; set and unknown values pass through.
    pub fn or_unknown(self) -> Self {
        match self {
            AttributeValue::Null => AttributeValue::Unknown,
            other => other,
        }
    }
}

impl<T: Clone> AttributeValue<T> {
    /// The configured value when set, otherwise `prior`.
    pub fn or_prior(&self, prior: &AttributeValue<T>) -> AttributeValue<T> {
        if self.is_null() {
            prior.clone()
        } else {
            self.clone()
        }
    }
}

impl<T> From<Option<T>> for AttributeValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => AttributeValue::Known(v),
            None => AttributeValue::Null,
        }
    }
}
