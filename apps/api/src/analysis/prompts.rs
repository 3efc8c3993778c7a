// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Classification prompt. Replace `{text_sample}` (first ~1000 chars) before sending.
pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"Analyze the following text and determine what type of document this is.

Choose from these categories:
- Resume/CV
- Meeting Notes
- Legal Document
- Research Paper
- Business Report
- General Document

Return a JSON object with this EXACT schema (no extra fields):
{
  "document_type": "Resume/CV"
}

Text sample:
{text_sample}"#;

/// Resume analysis template. Replace `{text}` before sending.
pub const RESUME_ANALYSIS_TEMPLATE: &str = r#"You are analyzing a RESUME/CV.

Return a JSON object with this EXACT schema:
{
  "summary": "3-4 lines covering key qualifications, experience level, and main skills",
  "action_items": [
    "Update contact information if needed",
    "Add quantifiable achievements"
  ]
}

Cover in the summary: years of experience, primary skills and technologies,
education level, and notable achievements. Action items should be concrete
improvements the candidate could make to this resume.

Document text:
{text}"#;

/// Meeting notes analysis template. Replace `{text}` before sending.
pub const MEETING_ANALYSIS_TEMPLATE: &str = r#"You are analyzing MEETING NOTES.

Return a JSON object with this EXACT schema:
{
  "summary": "3-4 lines covering meeting purpose, key decisions, and outcomes",
  "action_items": [
    "Task description (Due: date) - Assigned to: person"
  ]
}

Cover in the summary: meeting date and attendees if mentioned, main topics
discussed, decisions made, and next steps identified. Extract ALL tasks
mentioned, with due dates and assignees where present.

Document text:
{text}"#;

/// Legal document analysis template. Replace `{text}` before sending.
pub const LEGAL_ANALYSIS_TEMPLATE: &str = r#"You are analyzing a LEGAL DOCUMENT.

Return a JSON object with this EXACT schema:
{
  "summary": "3-4 lines covering document purpose, key terms, and parties involved",
  "action_items": [
    "Note important dates and deadlines",
    "Identify obligations and responsibilities"
  ]
}

Cover in the summary: the document type and purpose, parties involved, key
terms and conditions, and important dates and deadlines. Action items should
flag terms, deadlines, and obligations the reader must review.

Document text:
{text}"#;

/// Research paper analysis template. Replace `{text}` before sending.
pub const RESEARCH_ANALYSIS_TEMPLATE: &str = r#"You are analyzing a RESEARCH/ACADEMIC PAPER.

Return a JSON object with this EXACT schema:
{
  "summary": "3-4 lines covering research topic, methodology, and key findings",
  "action_items": [
    "Review methodology and data",
    "Check citations and references"
  ]
}

Cover in the summary: the research topic and objectives, methodology used,
key findings and conclusions, and authors/publication info if present.

Document text:
{text}"#;

/// Generic analysis template for reports and uncategorized documents.
/// Replace `{doc_label}` and `{text}` before sending.
pub const GENERIC_ANALYSIS_TEMPLATE: &str = r#"You are analyzing a {doc_label}.

Return a JSON object with this EXACT schema:
{
  "summary": "4-5 lines capturing the main points and purpose of this document",
  "action_items": [
    "Task description (due date if known) - assigned to (if known)"
  ]
}

Cover in the summary: main topics covered, important dates, numbers or
deadlines, key people or entities mentioned, and critical decisions or
conclusions. Extract any tasks, deadlines, or action items mentioned. If the
document contains no obvious actionable tasks, suggest relevant follow-up
actions based on the document type and content.

Document text:
{text}"#;

/// Suggested-questions prompt. Replace `{text}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Based on this document, generate 5-7 intelligent questions that someone might want to ask about it.
Make the questions specific and useful for understanding or working with this content.

Return a JSON array of question strings:
["What are the key deadlines mentioned?", "Who is responsible for the budget review?"]

Document sample:
{text}"#;

/// Q&A prompt over retrieved memory chunks.
/// Replace `{context}`, `{question}`, and `{instructions}` before sending.
pub const QA_PROMPT_TEMPLATE: &str = r#"You are an intelligent AI assistant helping the user find specific information from their uploaded documents.

Based on the following relevant content from the user's documents:

{context}

Please answer this specific question: {question}

Instructions:
{instructions}"#;

/// ATS scoring prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) analyzer. Analyze this resume for ATS compatibility and provide a comprehensive score and feedback.

RESUME TEXT:
{resume_text}

JOB DESCRIPTION (if provided):
{job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 78,
  "criteria": {
    "contact_information": "feedback on completeness and format",
    "section_headers": "feedback on standard ATS-friendly headers",
    "keywords_and_skills": "feedback on relevance and frequency",
    "formatting": "feedback on bullets, fonts, graphics",
    "content_structure": "feedback on hierarchy and logical flow",
    "quantified_achievements": "feedback on metrics and numbers",
    "job_description_match": "feedback on JD alignment, if a JD was provided"
  },
  "recommendations": [
    "Specific actionable improvement"
  ],
  "strengths": [
    "What the resume does well for ATS systems"
  ]
}

Rules:
- "score" is an integer from 0 to 100 considering keyword optimization, formatting, section headers, and contact info.
- Every criteria value is a short feedback sentence. Omit "job_description_match" from criteria when no job description is provided.
- Recommendations must be specific and actionable: missing keywords or skills, formatting corrections needed."#;

/// Placeholder for the ATS job-description slot when the caller supplies none.
pub const ATS_NO_JD: &str = "No specific job description provided - provide general ATS analysis";
