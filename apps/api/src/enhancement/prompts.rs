// Prompt constants for the two resume-rewriting operations.
// Both interpolate the serialized resume and the pasted job description and ask
// for a two-field JSON object.

/// Enhancement prompt. Replace `{resumeContent}` and `{jobDescription}`.
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Given the following resume content and job description, suggest improvements to the resume content based on the job description, focusing on relevant skills and experience.

Resume Content: {resumeContent}

Job Description: {jobDescription}

Please provide the enhanced resume content, and a summary of changes made.

Output in a JSON format:
{
    "enhancedResume": "The enhanced resume content.",
    "summary": "A summary of the changes made to the resume."
}"#;

/// Keyword optimization prompt. Replace `{resumeText}` and `{jobDescription}`.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"You are an expert resume optimizer.

You will analyze the resume provided, and rewrite it to include keywords from the job description to tailor it to the role.
You will also provide a concise summary of the resume.

Resume:
{resumeText}

Job Description:
{jobDescription}

Output in a JSON format:
{
    "optimizedResume": "The resume content optimized with relevant keywords.",
    "summary": "A concise summary of the resume."
}"#;
