use std::{fmt::Display, str::FromStr};

// The test application does not verify signatures. Instead the bearer token is a
// plain-text declaration of who is calling, e.g. `subscriber=ravi;can_subscribe`,
// which makes it easy to exercise the authorization paths.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Permissions {
    pub subscriber: Option<String>,
    pub can_subscribe: bool,
}

impl Permissions {
    pub fn subscriber(id: &str) -> Self {
        Self {
            subscriber: Some(id.into()),
            can_subscribe: true,
        }
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = &self.subscriber {
            parts.push(format!("subscriber={id}"));
        }
        if self.can_subscribe {
            parts.push("can_subscribe".to_owned());
        }
        f.write_str(&parts.join(";"))
    }
}

impl FromStr for Permissions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut permissions = Self::default();
        for part in s.split(';').filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some(("subscriber", id)) => permissions.subscriber = Some(id.to_owned()),
                None if part == "can_subscribe" => permissions.can_subscribe = true,
                _ => return Err(format!("unknown permission {part:?}")),
            }
        }
        Ok(permissions)
    }
}
