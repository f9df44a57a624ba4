// All LLM prompt constants for the AI flows. Each capability has a system
// prompt enforcing JSON-only output and a template with `{placeholders}`
// substituted before sending.

/// Shared fragment schema for capabilities that return resume content.
/// Kept as one constant so parse, generate, and apply-fixes stay in sync
/// with `ResumeFragment`.
const FRAGMENT_SCHEMA: &str = r#"{
  "name": "Jordan Reyes",
  "email": "jordan@example.com",
  "phone": "555-0100",
  "summary": "One short professional summary paragraph.",
  "experience": [
    {
      "id": "",
      "title": "Software Engineer",
      "company": "Acme Corp",
      "dates": "2020 - Present",
      "description": "What they did and achieved in the role."
    }
  ],
  "education": [
    {
      "id": "",
      "institution": "State University",
      "degree": "B.S. Computer Science",
      "dates": "2016 - 2020"
    }
  ],
  "projects": [
    {
      "id": "",
      "name": "Project Name",
      "description": "What the project does.",
      "url": "https://example.com"
    }
  ],
  "skills": ["Rust", "SQL"]
}"#;

// ─── Parse ──────────────────────────────────────────────────────────────────

/// System prompt for resume parsing — enforces JSON-only output.
pub const PARSE_SYSTEM: &str = "You are an expert resume parser. \
    You extract structured resume data from raw resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent information that is not present in the text.";

/// Resume parsing prompt template.
pub fn parse_prompt(resume_text: &str) -> String {
    format!(
        r#"Parse the following resume text into structured data.

Return a JSON object with this EXACT schema (no extra fields):
{FRAGMENT_SCHEMA}

Rules:
- Omit any top-level field you cannot find in the text rather than guessing.
- Leave every "id" field as an empty string.
- Keep dates exactly as written in the source text.

RESUME TEXT:
{resume_text}"#
    )
}

// ─── Generate ───────────────────────────────────────────────────────────────

/// System prompt for whole-resume generation — enforces JSON-only output.
pub const GENERATE_SYSTEM: &str = "You are an expert resume writer. \
    You draft complete, plausible resumes from a short description of a person. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Resume generation prompt template.
pub fn generate_prompt(description: &str) -> String {
    format!(
        r#"Generate a complete resume for the person described below.

Return a JSON object with this EXACT schema (no extra fields):
{FRAGMENT_SCHEMA}

Rules:
- Fill in every top-level field with realistic, specific content.
- Leave every "id" field as an empty string.
- Write achievement-oriented experience descriptions.

PERSON DESCRIPTION:
{description}"#
    )
}

// ─── Score ──────────────────────────────────────────────────────────────────

/// System prompt for skill scoring — enforces JSON-only output.
pub const SCORE_SYSTEM: &str = "You are an expert career coach and \
    recruiter. You rate how relevant each of a candidate's skills is to a \
    specific job description, from 0 (irrelevant) to 100 (essential). \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Skill scoring prompt template.
pub fn score_prompt(skills: &str, job_description: &str) -> String {
    format!(
        r#"Score each of the candidate's skills against the job description.

Return a JSON object with this EXACT schema (no extra fields):
{{
  "scores": [
    {{"skill": "Rust", "score": 95}}
  ]
}}

Rules:
- Include every skill from the candidate's list exactly once, spelled as given.
- Scores are integers from 0 to 100.
- Score only against the job description, not general market demand.

CANDIDATE SKILLS:
{skills}

JOB DESCRIPTION:
{job_description}"#
    )
}

// ─── Analyze ────────────────────────────────────────────────────────────────

/// System prompt for content evaluation — enforces JSON-only output.
pub const ANALYZE_SYSTEM: &str = "You are an expert resume evaluator. \
    You assess resume content for clarity, grammar, and ATS (applicant \
    tracking system) compatibility, and suggest concrete improvements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Content evaluation prompt template.
pub fn analyze_prompt(resume_content: &str) -> String {
    format!(
        r#"Evaluate the resume content below.

Return a JSON object with this EXACT schema (no extra fields):
{{
  "clarity_score": 85,
  "grammar_score": 92,
  "ats_score": 78,
  "effectiveness_feedback": "Two or three sentences of overall feedback.",
  "suggested_fixes": [
    "One concrete, self-contained fix the candidate should make."
  ]
}}

Rules:
- Scores are integers from 0 to 100.
- Every suggested fix must be actionable on its own, without this evaluation
  as context.
- Suggest at most five fixes; an empty list is valid for a strong resume.

RESUME CONTENT:
{resume_content}"#
    )
}

// ─── Apply fixes ────────────────────────────────────────────────────────────

/// System prompt for fix application — enforces JSON-only output.
pub const APPLY_FIXES_SYSTEM: &str = "You are an expert resume editor. \
    You apply a list of suggested fixes to resume content and return the \
    entire updated resume. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT make changes beyond the listed fixes.";

/// Fix application prompt template. `fixes` is a pre-formatted bullet list.
pub fn apply_fixes_prompt(resume_content: &str, fixes: &str) -> String {
    format!(
        r#"Apply the suggested fixes below to the resume content, then return
the ENTIRE updated resume, including the parts the fixes did not touch.

Return a JSON object with this EXACT schema (no extra fields):
{FRAGMENT_SCHEMA}

Rules:
- Apply every listed fix; change nothing else.
- Preserve each item's "id" field exactly as given in the input.
- Return all top-level fields that appear in the input content.

SUGGESTED FIXES:
{fixes}

CURRENT RESUME CONTENT:
{resume_content}"#
    )
}
