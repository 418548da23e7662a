//! Static portfolio content
//!
//! The built-in content is the author's resume. A JSON file with the same shape
//! can replace it wholesale (see `Portfolio::load_from_file`).

use crate::config::ConfigError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the cards render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Portfolio {
    pub identity: Identity,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub years: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub stack: Vec<String>,
    /// Deployed project or repository URL
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExperienceEntry {
    pub role: String,
    pub organization: String,
    pub dates: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Contact {
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SocialLink {
    pub title: String,
    pub subtitle: String,
    pub href: String,
}

impl Portfolio {
    /// Load content from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let portfolio: Portfolio = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        if portfolio.identity.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{}: identity.name cannot be empty",
                path.display()
            )));
        }

        Ok(portfolio)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            identity: Identity {
                name: "Nisanth Nimashakavi".to_string(),
                tagline: "Data Science Student & Full-Stack Developer".to_string(),
                skills: strings(&[
                    "Python",
                    "Java",
                    "Dart",
                    "R",
                    "TypeScript",
                    "JavaScript",
                    "TensorFlow",
                    "PyTorch",
                    "Keras",
                    "Scikit-learn",
                    "Flask",
                    "Django",
                    "FastAPI",
                    "Flutter",
                    "pandas",
                    "NumPy",
                ]),
            },
            education: vec![EducationEntry {
                degree: "Bachelor of Science in Data Science".to_string(),
                school: "Rutgers University, New Brunswick, NJ".to_string(),
                years: "Aug 2024 – May 2028".to_string(),
            }],
            projects: vec![
                Project {
                    title: "LeetDuel Online".to_string(),
                    description: "Real-time multiplayer competitive coding platform built with \
                                  FastAPI, PostgreSQL, and React; deployed via Render and Vercel \
                                  with authentication, leaderboards, and problem tracking."
                        .to_string(),
                    stack: strings(&["FastAPI", "PostgreSQL", "React", "TypeScript", "Vercel"]),
                    link: "https://leet-duel-online.vercel.app/".to_string(),
                },
                Project {
                    title: "Shot Sense".to_string(),
                    description: "Implemented real-time gunshot detection models with 98% \
                                  accuracy using CNNs; designed intuitive UI for visualization \
                                  and alerts."
                        .to_string(),
                    stack: strings(&["Python", "TensorFlow", "CNN", "UI Design"]),
                    link: "https://github.com/nimnim111/ShotSense".to_string(),
                },
                Project {
                    title: "Research Paper".to_string(),
                    description: "NLP research on detecting bias in job descriptions; developed \
                                  models promoting fairer recruitment and inclusivity."
                        .to_string(),
                    stack: strings(&["NLP", "Python", "GPT-4"]),
                    link: "https://zenodo.org/records/13897047".to_string(),
                },
            ],
            experience: vec![
                ExperienceEntry {
                    role: "Student Bono Internships and Volunteer".to_string(),
                    organization: "Various Non-Profits".to_string(),
                    dates: "May 2023 – Aug 2024".to_string(),
                    highlights: strings(&[
                        "Developed custom full-stack applications to streamline non-profit \
                         operations, reducing costs by over 100%.",
                        "Delivered cost-effective tech solutions saving organizations over \
                         $10,000 collectively.",
                        "Collaborated to optimize workflows and implement digital tools \
                         enhancing productivity and social impact.",
                    ]),
                },
                ExperienceEntry {
                    role: "Lead Martial Arts Instructor".to_string(),
                    organization: "West Coast World Martial Arts, California".to_string(),
                    dates: "Jan 2023 – Aug 2024".to_string(),
                    highlights: strings(&[
                        "Improved student tricking proficiency by 30% through structured \
                         training programs.",
                        "Managed and mentored a team of three instructors to ensure \
                         personalized and high-quality coaching.",
                        "Directed initiatives that boosted student retention by 30% through \
                         custom feedback loops and progression tracking.",
                        "Introduced innovative tricking methodologies and skill frameworks \
                         improving engagement and performance.",
                    ]),
                },
            ],
            contact: Contact {
                location: "San Francisco, CA".to_string(),
                email: "nisanth.s.nimashakavi@gmail.com".to_string(),
                socials: vec![
                    SocialLink {
                        title: "GitHub".to_string(),
                        subtitle: "@Nisanth-Nimashakavi".to_string(),
                        href: "https://github.com/Nisanth-Nimashakavi".to_string(),
                    },
                    SocialLink {
                        title: "LinkedIn".to_string(),
                        subtitle: "Nisanth Nimashakavi".to_string(),
                        href: "https://www.linkedin.com/in/nisanth-nimashakavi-98a817326/"
                            .to_string(),
                    },
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_content_is_complete() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.identity.skills.len(), 16);
        assert_eq!(portfolio.education.len(), 1);
        assert_eq!(portfolio.projects.len(), 3);
        assert_eq!(portfolio.experience.len(), 2);
        assert_eq!(portfolio.contact.socials.len(), 2);
        assert!(portfolio
            .projects
            .iter()
            .all(|p| p.link.starts_with("https://")));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        let json = r#"{
            "identity": { "name": "Ada", "tagline": "Engineer" },
            "contact": { "location": "London", "email": "ada@example.com" }
        }"#;
        std::fs::write(&path, json).unwrap();

        let portfolio = Portfolio::load_from_file(&path).unwrap();
        assert_eq!(portfolio.identity.name, "Ada");
        assert!(portfolio.projects.is_empty());
        assert!(portfolio.contact.socials.is_empty());
    }

    #[test]
    fn test_load_rejects_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content.json");
        let json = r#"{
            "identity": { "name": " ", "tagline": "" },
            "contact": { "location": "", "email": "" }
        }"#;
        std::fs::write(&path, json).unwrap();

        assert!(matches!(
            Portfolio::load_from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
