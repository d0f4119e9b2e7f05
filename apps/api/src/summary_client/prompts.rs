// Fixed instruction appended to every document sent to the hosted summarizer.

/// Asks the service for the ten-section report layout the local templates mirror.
pub const REPORT_INSTRUCTIONS: &str = "\
Summarize the following resume into a recruiter-ready report with the exact sections: \
1) Basic Profile (Name, Email, Phone, LinkedIn, GitHub, Portfolio). \
2) Education (degree, institute, years, CGPA). \
3) Skills (grouped: Programming, Libraries, Frameworks, Web Tech, Tools, Platforms, Soft Skills). \
4) Experience (role, org, dates, impact). \
5) Projects (highlights). \
6) Events & Hackathons. \
7) Certifications. \
8) Strengths. \
9) Areas to Improve. \
10) ATS & Recruiter View. Use concise bullet points and emojis like the sample provided.";

/// Joins the document text and the instruction into the request `text` field.
pub fn build_request_text(document: &str) -> String {
    format!("{document}\n\nInstructions: {REPORT_INSTRUCTIONS}")
}
