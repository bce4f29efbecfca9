mod resume;

pub use resume::{
    ResumeBasics, ResumeCertification, ResumeData, ResumeEducation, ResumeExperience,
    ResumeLanguage, ResumeProject, ResumeSkillGroup,
};
