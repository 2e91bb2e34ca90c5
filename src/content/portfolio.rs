//! Built-in portfolio content
//!
//! [`Portfolio`] is plain configuration data (who the owner is, what they
//! know, what they built). [`Portfolio::registry`] turns it into the command
//! table the terminal serves. Everything here can be overridden from the
//! `[content]` section of the config file.

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::registry::{CommandRegistration, CommandRegistry, CommandSummary};
use super::{handler_fn, HandlerOutput, StaticHandler};
use crate::error::Result;
use crate::models::Line;

const BULLET: &str = "  •";

/// Personal details shown by `about`, `resume` and `contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub location: String,
    pub bio: String,
    pub education: Vec<String>,
    pub experience: Vec<String>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: "Alex Developer".to_string(),
            title: "Full Stack Developer & AI Enthusiast".to_string(),
            email: "alex@example.com".to_string(),
            location: "San Francisco, CA".to_string(),
            bio: "Passionate developer with 5+ years of experience building scalable web \
                  applications and AI-powered solutions. Love creating immersive user \
                  experiences and solving complex problems."
                .to_string(),
            education: vec![
                "B.S. Computer Science - Stanford University (2019)".to_string(),
                "Machine Learning Certification - Coursera (2021)".to_string(),
            ],
            experience: vec![
                "Senior Developer at TechCorp (2021-Present)".to_string(),
                "Full Stack Developer at StartupXYZ (2019-2021)".to_string(),
                "Software Engineering Intern at BigTech (2018)".to_string(),
            ],
        }
    }
}

/// A named group of skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub category: String,
    pub items: Vec<String>,
}

impl Skill {
    fn new(category: &str, items: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// A profile link shown by `contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl SocialLink {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Everything the portfolio commands print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub links: Vec<SocialLink>,
    /// Topics listed under "I'm always open to discussing"
    pub interests: Vec<String>,
    /// Short handle used by `whoami`
    pub handle: String,
    /// Lines of the welcome banner after the greeting
    pub welcome: Vec<String>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            personal: PersonalInfo::default(),
            skills: vec![
                Skill::new(
                    "Frontend",
                    &["React", "TypeScript", "Next.js", "Tailwind CSS", "Three.js", "Vue.js"],
                ),
                Skill::new(
                    "Backend",
                    &["Node.js", "Python", "PostgreSQL", "MongoDB", "Redis", "GraphQL"],
                ),
                Skill::new(
                    "AI/ML",
                    &["OpenAI API", "TensorFlow", "PyTorch", "LangChain", "Computer Vision"],
                ),
                Skill::new(
                    "DevOps",
                    &["Docker", "AWS", "Vercel", "GitHub Actions", "Kubernetes"],
                ),
                Skill::new(
                    "Tools",
                    &["Git", "VS Code", "Figma", "Postman", "Linear", "Notion"],
                ),
            ],
            projects: vec![
                Project {
                    name: "AI Code Assistant".to_string(),
                    description: "Built an intelligent code completion tool using OpenAI's GPT-4. \
                                  Features include real-time code suggestions, bug detection, and \
                                  documentation generation."
                        .to_string(),
                    technologies: vec![
                        "React".to_string(),
                        "Node.js".to_string(),
                        "OpenAI API".to_string(),
                        "TypeScript".to_string(),
                    ],
                    url: Some("https://ai-assistant.demo.com".to_string()),
                    github: Some("https://github.com/alex/ai-assistant".to_string()),
                    featured: true,
                },
                Project {
                    name: "3D Portfolio Website".to_string(),
                    description: "Interactive terminal-style portfolio with Three.js animations \
                                  and AI-powered chat functionality."
                        .to_string(),
                    technologies: vec![
                        "React".to_string(),
                        "Three.js".to_string(),
                        "Framer Motion".to_string(),
                        "Tailwind CSS".to_string(),
                    ],
                    url: Some("https://portfolio.demo.com".to_string()),
                    github: Some("https://github.com/alex/portfolio".to_string()),
                    featured: true,
                },
                Project {
                    name: "E-commerce Platform".to_string(),
                    description: "Full-stack e-commerce solution with real-time inventory, \
                                  payment processing, and admin dashboard."
                        .to_string(),
                    technologies: vec![
                        "Next.js".to_string(),
                        "PostgreSQL".to_string(),
                        "Stripe".to_string(),
                        "Prisma".to_string(),
                    ],
                    url: Some("https://shop.demo.com".to_string()),
                    github: Some("https://github.com/alex/ecommerce".to_string()),
                    featured: false,
                },
            ],
            links: vec![
                SocialLink::new("LinkedIn", "linkedin.com/in/alexdev"),
                SocialLink::new("GitHub", "github.com/alexdev"),
                SocialLink::new("Twitter", "@alexdev"),
                SocialLink::new("Portfolio", "alexdev.com"),
            ],
            interests: vec![
                "New opportunities".to_string(),
                "Exciting projects".to_string(),
                "Tech collaborations".to_string(),
                "AI/ML innovations".to_string(),
            ],
            handle: "alexdev".to_string(),
            welcome: vec![
                "Welcome to my interactive portfolio terminal!".to_string(),
                "Type 'help' to see available commands.".to_string(),
            ],
        }
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("{BULLET} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Portfolio {
    /// Build the command table; `reserved` lists commands the dispatcher
    /// handles itself so `help` can mention them
    pub fn registry(&self, reserved: Vec<CommandSummary>) -> Result<CommandRegistry> {
        let mut builder = CommandRegistry::builder()
            .register(CommandRegistration::new(
                "about",
                "Show personal information and bio",
                StaticHandler::new(Line::output(self.about_text())),
            ))
            .register(CommandRegistration::new(
                "skills",
                "Display technical skills and expertise",
                StaticHandler::new(Line::output(self.skills_text())),
            ))
            .register(CommandRegistration::new(
                "projects",
                "List portfolio projects",
                StaticHandler::new(Line::output(self.projects_text())),
            ))
            .register(CommandRegistration::new(
                "resume",
                "View resume and download links",
                StaticHandler::new(Line::output(self.resume_text())),
            ))
            .register(CommandRegistration::new(
                "contact",
                "Get contact information",
                StaticHandler::new(Line::output(self.contact_text())),
            ))
            .register(CommandRegistration::new(
                "theme",
                "Toggle light/dark theme",
                StaticHandler::new(
                    "Theme switching coming soon! Currently using terminal dark theme.",
                ),
            ))
            .register(
                CommandRegistration::new(
                    "chat",
                    "Start AI-powered conversation",
                    StaticHandler::new(CHAT_STUB),
                )
                .alias("ai"),
            )
            .register(CommandRegistration::new(
                "whoami",
                "Show current user info",
                StaticHandler::new(format!("portfolio-visitor@{}-terminal:~$", self.handle)),
            ))
            .register(CommandRegistration::new(
                "date",
                "Show current date and time",
                handler_fn(|_args: Vec<String>| async move {
                    let now = Local::now().format("%A, %B %-d, %Y %H:%M:%S");
                    Ok::<_, anyhow::Error>(HandlerOutput::Text(now.to_string()))
                }),
            ))
            .register(CommandRegistration::new(
                "ls",
                "List directory contents",
                StaticHandler::new(LS_LISTING),
            ))
            .register(CommandRegistration::new(
                "echo",
                "Print the given text",
                handler_fn(|args: Vec<String>| async move {
                    Ok::<_, anyhow::Error>(HandlerOutput::Text(args.join(" ")))
                }),
            ));

        for summary in reserved {
            builder = builder.reserve(summary);
        }
        builder.build()
    }

    /// Lines of the startup banner
    ///
    /// `commands` is the list advertised on the first line; `prompt` is the
    /// rendered prompt used for the scripted `welcome` echo.
    pub fn banner(&self, prompt: &str, commands: &[String]) -> Vec<Line> {
        let mut lines = vec![
            Line::info(commands.join(" | ")),
            Line::system(""),
            Line::command_echo(format!("{prompt} welcome")),
            Line::output(format!(
                "Hi, I'm {}, a {}.",
                self.personal.name, self.personal.title
            )),
            Line::system(""),
        ];
        lines.extend(self.welcome.iter().map(Line::output));
        lines.push(Line::system(""));
        lines
    }

    pub fn about_text(&self) -> String {
        let p = &self.personal;
        format!(
            "Name: {}\nTitle: {}\nLocation: {}\n\nBio:\n{}\n\nEducation:\n{}\n\nExperience:\n{}",
            p.name,
            p.title,
            p.location,
            p.bio,
            bullets(&p.education),
            bullets(&p.experience)
        )
    }

    pub fn skills_text(&self) -> String {
        let mut text = String::from("Technical Skills & Expertise");
        for skill in &self.skills {
            text.push_str(&format!("\n\n{}:\n{}", skill.category, bullets(&skill.items)));
        }
        text
    }

    pub fn projects_text(&self) -> String {
        let mut text = String::from("Portfolio Projects");
        for (i, project) in self.projects.iter().enumerate() {
            text.push_str(&format!(
                "\n\n{}. {}{}\n   {}\n   Tech: {}",
                i + 1,
                project.name,
                if project.featured { " (Featured)" } else { "" },
                project.description,
                project.technologies.join(", ")
            ));
            if let Some(url) = &project.url {
                text.push_str(&format!("\n   Live: {url}"));
            }
            if let Some(github) = &project.github {
                text.push_str(&format!("\n   Code: {github}"));
            }
        }
        text
    }

    pub fn resume_text(&self) -> String {
        let p = &self.personal;
        let key_skills: Vec<&str> = self
            .skills
            .iter()
            .flat_map(|s| s.items.iter().map(String::as_str))
            .take(8)
            .collect();
        format!(
            "Resume & Experience\n\n{}\n{}\n{} | {}\n\nProfessional Experience:\n{}\n\n\
             Education:\n{}\n\nKey Skills: {}\n\nDownload full resume: /resume.pdf",
            p.name,
            p.title,
            p.email,
            p.location,
            bullets(&p.experience),
            bullets(&p.education),
            key_skills.join(", ")
        )
    }

    pub fn contact_text(&self) -> String {
        let links: Vec<String> = self
            .links
            .iter()
            .map(|l| format!("{}: {}", l.label, l.url))
            .collect();
        format!(
            "Let's Connect!\n\nEmail: {}\nLocation: {}\n\nI'm always open to discussing:\n{}\n\n\
             Find me online:\n{}\n\nFeel free to reach out anytime!",
            self.personal.email,
            self.personal.location,
            bullets(&self.interests),
            bullets(&links)
        )
    }
}

const CHAT_STUB: &str = "AI Chat Mode\n\n\
AI chat is not connected in this terminal yet.\n\n\
For now, you can explore other commands like:\n  \
• about - Learn about me\n  \
• projects - See my work\n  \
• skills - View my expertise\n\n\
Type 'help' for all available commands!";

const LS_LISTING: &str = "drwxr-xr-x  portfolio/\n\
drwxr-xr-x  projects/\n\
drwxr-xr-x  skills/\n\
-rw-r--r--  resume.pdf\n\
-rw-r--r--  contact.txt\n\
-rw-r--r--  about.md";
