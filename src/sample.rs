//! Bundled sample resume, used when no parse output exists yet and as the
//! canonical fixture in tests.

use crate::models::{
    ResumeBasics, ResumeCertification, ResumeData, ResumeEducation, ResumeExperience,
    ResumeLanguage, ResumeProject, ResumeSkillGroup,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_resume() -> ResumeData {
    ResumeData {
        basics: ResumeBasics {
            name: "Alex Johnson".into(),
            headline: "Senior Software Engineer".into(),
            email: "alex.johnson@email.com".into(),
            phone: "(555) 123-4567".into(),
            location: "San Francisco, CA".into(),
            linkedin: "linkedin.com/in/alexjohnson".into(),
            website: "alexjohnson.dev".into(),
            summary: "Results-driven software engineer with 8+ years of experience building \
                      scalable web applications and leading cross-functional teams. Passionate \
                      about clean code, developer experience, and delivering products that \
                      delight users. Proven track record of shipping features that drive 30%+ \
                      improvements in key business metrics."
                .into(),
        },
        experience: vec![
            ResumeExperience {
                id: "exp-1".into(),
                company: "TechCorp Inc.".into(),
                position: "Senior Software Engineer".into(),
                start_date: "Jan 2022".into(),
                end_date: "Present".into(),
                location: "San Francisco, CA".into(),
                highlights: strings(&[
                    "Led a team of 5 engineers to redesign the core platform, resulting in a 40% improvement in page load times",
                    "Architected and implemented a microservices-based API gateway handling 10M+ requests/day",
                    "Mentored 3 junior developers through structured code reviews and pair programming sessions",
                    "Introduced CI/CD best practices that reduced deployment time from 2 hours to 15 minutes",
                ]),
            },
            ResumeExperience {
                id: "exp-2".into(),
                company: "StartupXYZ".into(),
                position: "Full Stack Developer".into(),
                start_date: "Mar 2019".into(),
                end_date: "Dec 2021".into(),
                location: "Remote".into(),
                highlights: strings(&[
                    "Built the entire frontend application from scratch using React and TypeScript, serving 50K+ users",
                    "Designed and implemented RESTful APIs with Node.js and PostgreSQL",
                    "Reduced infrastructure costs by 35% through optimization and migration to serverless architecture",
                    "Collaborated with product and design teams to ship 20+ features per quarter",
                ]),
            },
            ResumeExperience {
                id: "exp-3".into(),
                company: "Digital Agency Co.".into(),
                position: "Frontend Developer".into(),
                start_date: "Jun 2016".into(),
                end_date: "Feb 2019".into(),
                location: "New York, NY".into(),
                highlights: strings(&[
                    "Developed responsive web applications for 15+ clients across various industries",
                    "Implemented A/B testing framework that increased conversion rates by 25%",
                    "Built reusable component library adopted across 8 internal projects",
                ]),
            },
        ],
        education: vec![ResumeEducation {
            id: "edu-1".into(),
            institution: "University of California, Berkeley".into(),
            degree: "Bachelor of Science".into(),
            field: "Computer Science".into(),
            start_date: "2012".into(),
            end_date: "2016".into(),
            gpa: Some("3.8".into()),
        }],
        skills: vec![
            ResumeSkillGroup {
                category: "Languages".into(),
                items: strings(&["TypeScript", "JavaScript", "Python", "Go", "SQL"]),
            },
            ResumeSkillGroup {
                category: "Frontend".into(),
                items: strings(&["React", "Next.js", "Vue.js", "Tailwind CSS", "HTML/CSS"]),
            },
            ResumeSkillGroup {
                category: "Backend".into(),
                items: strings(&["Node.js", "Express", "PostgreSQL", "Redis", "GraphQL"]),
            },
            ResumeSkillGroup {
                category: "Tools & Platforms".into(),
                items: strings(&["AWS", "Docker", "Kubernetes", "Git", "CI/CD"]),
            },
        ],
        certifications: vec![
            ResumeCertification {
                name: "AWS Solutions Architect - Associate".into(),
                issuer: "Amazon Web Services".into(),
                date: "2023".into(),
            },
            ResumeCertification {
                name: "Google Cloud Professional Developer".into(),
                issuer: "Google".into(),
                date: "2022".into(),
            },
        ],
        languages: vec![
            ResumeLanguage {
                language: "English".into(),
                proficiency: "Native".into(),
            },
            ResumeLanguage {
                language: "Spanish".into(),
                proficiency: "Professional Working".into(),
            },
        ],
        projects: vec![ResumeProject {
            id: "proj-1".into(),
            name: "Open Source CLI Tool".into(),
            description: "A developer productivity tool for managing microservices locally".into(),
            highlights: strings(&[
                "Built with Go, 2K+ GitHub stars",
                "Featured in several developer newsletters",
                "Active community with 50+ contributors",
            ]),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_every_section_populated() {
        let data = sample_resume();
        assert!(!data.basics.summary.is_empty());
        assert!(!data.experience.is_empty());
        assert!(!data.education.is_empty());
        assert!(!data.skills.is_empty());
        assert!(!data.certifications.is_empty());
        assert!(!data.languages.is_empty());
        assert!(!data.projects.is_empty());
    }

    #[test]
    fn test_sample_entry_ids_are_unique() {
        let data = sample_resume();
        let mut ids: Vec<&str> = data
            .experience
            .iter()
            .map(|e| e.id.as_str())
            .chain(data.education.iter().map(|e| e.id.as_str()))
            .chain(data.projects.iter().map(|p| p.id.as_str()))
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
