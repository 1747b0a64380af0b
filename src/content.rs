use std::collections::BTreeSet;

use crate::error::{KineticError, KineticResult};

/// Read-only structured document supplying every piece of site copy. The
/// engine never hardcodes content; pages are assembled from this model.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SiteContent {
    pub navigation: Navigation,
    pub personal: Personal,
    pub hero: Hero,
    pub about: About,
    pub process: Process,
    pub contact: Contact,
    pub footer: Footer,
    #[serde(default)]
    pub works: Option<Works>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Navigation {
    pub sections: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Personal {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Hero {
    /// Headline fragments revealed with a per-word stagger.
    pub title_words: Vec<String>,
    pub description: String,
    pub buttons: ButtonPair,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct About {
    pub title: String,
    pub subtitle: String,
    pub journey: Journey,
    pub skills: Skills,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Journey {
    pub title: String,
    pub content: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Skills {
    pub title: String,
    pub list: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Process {
    pub title: String,
    pub subtitle: String,
    pub steps: Vec<ProcessStep>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProcessStep {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub buttons: ButtonPair,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Footer {
    pub copyright: String,
}

/// Gated works sub-application content: case studies plus a graphic-design
/// gallery. Image references are opaque paths supplied by the asset
/// collaborator.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Works {
    pub items: Vec<WorkItem>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WorkItem {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ButtonPair {
    pub primary: ButtonSpec,
    pub secondary: ButtonSpec,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ButtonSpec {
    pub text: String,
    pub action: ButtonAction,
    pub target: String,
}

/// Button dispatch verb. Unknown verbs deserialize into `Other` so a stale
/// document degrades to a logged no-op instead of a parse failure.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonAction {
    Scroll,
    Email,
    Link,
    Phone,
    Other(String),
}

impl From<String> for ButtonAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "scroll" => Self::Scroll,
            "email" => Self::Email,
            "link" => Self::Link,
            "phone" => Self::Phone,
            _ => Self::Other(s),
        }
    }
}

impl From<ButtonAction> for String {
    fn from(a: ButtonAction) -> Self {
        match a {
            ButtonAction::Scroll => "scroll".to_string(),
            ButtonAction::Email => "email".to_string(),
            ButtonAction::Link => "link".to_string(),
            ButtonAction::Phone => "phone".to_string(),
            ButtonAction::Other(s) => s,
        }
    }
}

impl SiteContent {
    pub fn from_json_str(s: &str) -> KineticResult<Self> {
        let content: Self =
            serde_json::from_str(s).map_err(|e| KineticError::serde(e.to_string()))?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> KineticResult<()> {
        if self.navigation.sections.is_empty() {
            return Err(KineticError::validation(
                "navigation must list at least one section",
            ));
        }
        let unique: BTreeSet<&str> = self
            .navigation
            .sections
            .iter()
            .map(String::as_str)
            .collect();
        if unique.len() != self.navigation.sections.len() {
            return Err(KineticError::validation(
                "navigation section ids must be unique",
            ));
        }

        if self.hero.title_words.is_empty() {
            return Err(KineticError::validation("hero title_words must be non-empty"));
        }
        if self.about.skills.list.is_empty() {
            return Err(KineticError::validation("about skills list must be non-empty"));
        }
        if self.process.steps.is_empty() {
            return Err(KineticError::validation("process steps must be non-empty"));
        }

        for (where_, button) in [
            ("hero.primary", &self.hero.buttons.primary),
            ("hero.secondary", &self.hero.buttons.secondary),
            ("contact.primary", &self.contact.buttons.primary),
            ("contact.secondary", &self.contact.buttons.secondary),
        ] {
            if button.text.trim().is_empty() {
                return Err(KineticError::validation(format!(
                    "button '{where_}' text must be non-empty"
                )));
            }
            if button.action == ButtonAction::Scroll
                && !unique.contains(button.target.as_str())
            {
                return Err(KineticError::validation(format!(
                    "button '{where_}' scrolls to unknown section '{}'",
                    button.target
                )));
            }
        }

        if let Some(works) = &self.works {
            let slugs: BTreeSet<&str> = works.items.iter().map(|i| i.slug.as_str()).collect();
            if slugs.len() != works.items.len() {
                return Err(KineticError::validation("work item slugs must be unique"));
            }
            if works.items.iter().any(|i| i.slug.trim().is_empty()) {
                return Err(KineticError::validation("work item slugs must be non-empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn basic_content() -> SiteContent {
        SiteContent {
            navigation: Navigation {
                sections: vec![
                    "home".into(),
                    "about".into(),
                    "process".into(),
                    "contact".into(),
                ],
            },
            personal: Personal {
                name: "Francesca R.".into(),
                role: "UX Designer".into(),
            },
            hero: Hero {
                title_words: vec!["HI,".into(), "I'M".into(), "FRANCESCA".into(), "R.".into()],
                description: "UX designer crafting kinetic editorial experiences.".into(),
                buttons: ButtonPair {
                    primary: ButtonSpec {
                        text: "See my work".into(),
                        action: ButtonAction::Scroll,
                        target: "process".into(),
                    },
                    secondary: ButtonSpec {
                        text: "Get in touch".into(),
                        action: ButtonAction::Email,
                        target: "hello@example.com".into(),
                    },
                },
            },
            about: About {
                title: "About".into(),
                subtitle: "Design with momentum".into(),
                journey: Journey {
                    title: "My journey".into(),
                    content: vec!["Started in print.".into(), "Moved to product.".into()],
                },
                skills: Skills {
                    title: "Skills".into(),
                    list: vec!["Research".into(), "Prototyping".into(), "Motion".into()],
                },
            },
            process: Process {
                title: "Process".into(),
                subtitle: "How I work".into(),
                steps: vec![
                    ProcessStep {
                        icon: "target".into(),
                        title: "Discover".into(),
                        description: "Understand the problem.".into(),
                    },
                    ProcessStep {
                        icon: "lightbulb".into(),
                        title: "Define".into(),
                        description: "Frame the opportunity.".into(),
                    },
                    ProcessStep {
                        icon: "zap".into(),
                        title: "Design".into(),
                        description: "Iterate fast.".into(),
                    },
                    ProcessStep {
                        icon: "users".into(),
                        title: "Deliver".into(),
                        description: "Ship and learn.".into(),
                    },
                ],
            },
            contact: Contact {
                title: "Let's talk".into(),
                subtitle: "Always open to new projects".into(),
                buttons: ButtonPair {
                    primary: ButtonSpec {
                        text: "Email me".into(),
                        action: ButtonAction::Email,
                        target: "hello@example.com".into(),
                    },
                    secondary: ButtonSpec {
                        text: "LinkedIn".into(),
                        action: ButtonAction::Link,
                        target: "https://example.com/in/francesca".into(),
                    },
                },
            },
            footer: Footer {
                copyright: "(c) 2026 Francesca R.".into(),
            },
            works: Some(Works {
                items: vec![
                    WorkItem {
                        title: "Adidas design system".into(),
                        slug: "adidas-design-system".into(),
                        image: "assets/adidas.jpg".into(),
                    },
                    WorkItem {
                        title: "AR/VR experience".into(),
                        slug: "ar-vr-experience".into(),
                        image: "assets/arvr.jpg".into(),
                    },
                ],
            }),
        }
    }
}
