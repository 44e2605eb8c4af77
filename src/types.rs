use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest resume the careers form accepts.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

const RESUME_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_staff.unwrap_or(false) || self.is_superuser.unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Credentials issued by `/auth/login/` and `/auth/register/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl RegisterPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.password != self.password2 {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
            Self::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "contract" => Ok(Self::Contract),
            "internship" => Ok(Self::Internship),
            other => Err(format!(
                "unknown job type '{other}' (expected full-time, part-time, contract or internship)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default)]
    pub application_count: u32,
}

/// Body for creating or patching a job. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberInput {
    pub name: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub image: Option<Upload>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Shortlisted,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        Self::Pending,
        Self::Reviewing,
        Self::Shortlisted,
        Self::Rejected,
        Self::Accepted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewing => "reviewing",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| {
                "Invalid status. Please use: pending, reviewing, shortlisted, rejected, or accepted"
                    .to_string()
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: i64,
    pub job: i64,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct ApplicationSubmission {
    pub job: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: String,
    pub resume: Option<Upload>,
}

impl ApplicationSubmission {
    pub fn validate(&self) -> Result<&Upload, String> {
        let Some(resume) = self.resume.as_ref() else {
            return Err("Please upload your resume".to_string());
        };
        if resume.bytes.len() > MAX_RESUME_BYTES {
            return Err("File size must be less than 5MB".to_string());
        }
        if !RESUME_MIME_TYPES.contains(&resume.mime.as_str()) {
            return Err("Please upload a PDF, DOC, or DOCX file".to_string());
        }
        Ok(resume)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub message: String,
    pub application: JobApplication,
}

/// Plain `{ "message": ... }` acknowledgement returned by create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<Upload>,
    pub avatar: Option<Upload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// A file held in memory so the same bytes can be sent again when a request is replayed.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(file_name, mime, bytes))
    }
}

/// List endpoints answer either a bare array or a paginated `{ "results": [...] }` page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse<T> {
    Page { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Page { results } => results,
            Self::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(is_staff: Option<bool>, is_superuser: Option<bool>) -> User {
        User {
            id: 1,
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: None,
            is_staff,
            is_superuser,
        }
    }

    #[test]
    fn is_admin_is_staff_or_superuser() {
        assert!(!user(None, None).is_admin());
        assert!(!user(Some(false), Some(false)).is_admin());
        assert!(user(Some(true), None).is_admin());
        assert!(user(None, Some(true)).is_admin());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut u = user(None, None);
        assert_eq!(u.display_name(), "amina");
        u.first_name = "Amina".to_string();
        u.last_name = "Yusuf".to_string();
        assert_eq!(u.display_name(), "Amina Yusuf");
    }

    #[test]
    fn register_payload_rejects_mismatched_passwords() {
        let payload = RegisterPayload {
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            password: "secret-one".to_string(),
            password2: "secret-two".to_string(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(payload.validate(), Err("Passwords do not match".to_string()));

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("first_name").is_none());
    }

    #[test]
    fn application_status_parses_case_insensitively() {
        assert_eq!(
            "Shortlisted".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Shortlisted)
        );
        assert_eq!(" ACCEPTED ".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Accepted));
        assert!("hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn job_decodes_with_kebab_case_type_and_deadline() {
        let job: Job = serde_json::from_value(json!({
            "id": 7,
            "title": "Rust Engineer",
            "department": "Platform",
            "location": "Remote",
            "job_type": "part-time",
            "description": "d",
            "requirements": "r",
            "responsibilities": "s",
            "salary_range": "",
            "is_active": true,
            "posted_date": "2026-03-01T10:00:00.123456Z",
            "application_deadline": "2026-04-01",
            "application_count": 3
        }))
        .unwrap();
        assert_eq!(job.job_type, JobType::PartTime);
        assert_eq!(job.application_deadline, NaiveDate::from_ymd_opt(2026, 4, 1));
        assert_eq!(job.application_count, 3);
    }

    #[test]
    fn job_input_omits_unset_fields() {
        let input = JobInput {
            title: Some("Designer".to_string()),
            job_type: Some(JobType::Contract),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "title": "Designer", "job_type": "contract" })
        );
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let page: ListResponse<Service> = serde_json::from_value(json!({
            "count": 1,
            "results": [{ "id": 1, "title": "Cloud" }]
        }))
        .unwrap();
        assert_eq!(page.into_vec().len(), 1);

        let bare: ListResponse<Service> =
            serde_json::from_value(json!([{ "id": 1, "title": "Cloud" }, { "id": 2, "title": "AI" }]))
                .unwrap();
        assert_eq!(bare.into_vec().len(), 2);
    }

    #[test]
    fn submission_requires_a_small_document_resume() {
        let mut submission = ApplicationSubmission {
            job: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            phone: String::new(),
            cover_letter: String::new(),
            resume: None,
        };
        assert_eq!(submission.validate().unwrap_err(), "Please upload your resume");

        submission.resume = Some(Upload::new("cv.png", "image/png", vec![0; 10]));
        assert_eq!(
            submission.validate().unwrap_err(),
            "Please upload a PDF, DOC, or DOCX file"
        );

        submission.resume = Some(Upload::new(
            "cv.pdf",
            "application/pdf",
            vec![0; MAX_RESUME_BYTES + 1],
        ));
        assert_eq!(submission.validate().unwrap_err(), "File size must be less than 5MB");

        submission.resume = Some(Upload::new("cv.pdf", "application/pdf", vec![0; 10]));
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn upload_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let upload = Upload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "resume.pdf");
        assert_eq!(upload.mime, "application/pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4");
    }
}
