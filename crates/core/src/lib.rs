#![forbid(unsafe_code)]

mod diff;
mod fields;
mod reconcile;

pub use diff::*;
pub use fields::*;
pub use reconcile::*;

pub mod ids {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    macro_rules! row_id {
        ($name:ident) => {
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                pub const fn new(value: i64) -> Self {
                    Self(value)
                }

                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl From<i64> for $name {
                fn from(value: i64) -> Self {
                    Self(value)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        };
    }

    row_id!(DocumentId);
    row_id!(TagId);
    row_id!(UserId);
}

pub mod model {
    use serde::{Deserialize, Serialize};

    /// UI grouping bucket for tags. Unknown stored values fall into `Other`.
    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum TagCategory {
        #[default]
        General,
        Writing,
        Coding,
        Analysis,
        Translation,
        Roleplay,
        Other,
    }

    impl TagCategory {
        pub const ALL: &'static [TagCategory] = &[
            TagCategory::General,
            TagCategory::Writing,
            TagCategory::Coding,
            TagCategory::Analysis,
            TagCategory::Translation,
            TagCategory::Roleplay,
            TagCategory::Other,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::General => "general",
                Self::Writing => "writing",
                Self::Coding => "coding",
                Self::Analysis => "analysis",
                Self::Translation => "translation",
                Self::Roleplay => "roleplay",
                Self::Other => "other",
            }
        }

        pub fn parse(value: &str) -> Self {
            let value = value.trim();
            if value.is_empty() {
                return Self::General;
            }
            Self::ALL
                .iter()
                .copied()
                .find(|category| category.as_str().eq_ignore_ascii_case(value))
                .unwrap_or(Self::Other)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Permission {
        Read,
        Write,
        Admin,
    }

    impl Permission {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Read => "read",
                Self::Write => "write",
                Self::Admin => "admin",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value.trim().to_ascii_lowercase().as_str() {
                "read" => Some(Self::Read),
                "write" => Some(Self::Write),
                "admin" => Some(Self::Admin),
                _ => None,
            }
        }

        fn rank(self) -> u8 {
            match self {
                Self::Read => 1,
                Self::Write => 2,
                Self::Admin => 3,
            }
        }

        /// True when a holder of `self` may perform an action requiring `required`.
        pub fn allows(self, required: Permission) -> bool {
            self.rank() >= required.rank()
        }
    }
}

#[cfg(test)]
mod tests;
