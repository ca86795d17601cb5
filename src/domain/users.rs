/// Account role attached to every user. New registrations default to
/// `Blogger` unless the request says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Blogger,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Blogger => "blogger",
            Role::Guest => "guest",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "blogger" => Some(Role::Blogger),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Blogger
    }
}
