use crate::models::{ChildProfile, LibraryEntry, ParsedProfile};

/// Sampling parameters per completion use. Extraction runs cold for
/// reproducible field mapping; comparison slightly warmer; narrative
/// writing warmer still.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;
pub const EXTRACTION_MAX_TOKENS: u32 = 1500;
pub const MATCH_TEMPERATURE: f32 = 0.3;
pub const MATCH_MAX_TOKENS: u32 = 800;
pub const NARRATIVE_TEMPERATURE: f32 = 0.7;
pub const NARRATIVE_MAX_TOKENS: u32 = 1500;

pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert resume parser specializing in \
    extracting structured profile data for Jewish matchmaking purposes. You are thorough and \
    extract as much relevant information as possible.";

pub const MATCH_SYSTEM_PROMPT: &str = "You are a professional shadchan (matchmaker) with deep \
    understanding of Jewish matchmaking principles. Always return valid JSON without any \
    markdown formatting or code blocks.";

pub const NARRATIVE_SYSTEM_PROMPT: &str = "You are an expert matchmaker and profile writer who \
    creates engaging, comprehensive shidduch profiles for Jewish matchmaking purposes. You \
    write in a warm, professional tone that highlights the best qualities while being authentic.";

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

/// Build the structured-extraction instruction for raw resume text
pub fn build_extraction_prompt(file_content: &str) -> String {
    format!(
        r#"You are an expert resume parser. Analyze the following resume content and extract comprehensive profile information.

RESUME CONTENT TO ANALYZE:
{file_content}

Extract and return ONLY a JSON object with this exact structure:
{{
  "name": "Full name of the person",
  "age": number or null if not found,
  "location": "City, State/Country where they live",
  "occupation": "Current job title or profession",
  "education": "Educational background, schools attended, degrees",
  "background": "Religious background, family values, community involvement, personal qualities",
  "hashkafa": "Religious observance level (Orthodox, Modern Orthodox, Conservative, Reform, etc.)",
  "gender": "Male or Female",
  "interests": ["hobby1", "hobby2", "interest3"],
  "personality_traits": ["trait1", "trait2", "trait3"],
  "family_values": "Family priorities, what they're looking for in a match"
}}"#
    )
}

/// Build the pairwise compatibility instruction for one (child, candidate)
/// pairing
pub fn build_match_prompt(child: &ChildProfile, candidate: Option<&ParsedProfile>) -> String {
    let candidate_json = candidate
        .and_then(|profile| serde_json::to_string_pretty(profile).ok())
        .unwrap_or_else(|| "{}".to_string());

    let age = child
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    format!(
        r#"You are an expert matchmaker. Compare these two profiles and provide a detailed compatibility analysis.

UPLOADED RESUME PROFILE:
{candidate_json}

CHILD'S PROFILE:
Name: {name}
Age: {age}
Location: {location}
Occupation: {occupation}
Education: {education}
Background: {background}
Hashkafa: {hashkafa}
Gender: {gender}

Analyze compatibility based on:
1. Religious observance level compatibility
2. Educational background compatibility
3. Geographic proximity
4. Age appropriateness
5. Family values alignment
6. Lifestyle compatibility
7. Gender appropriateness (most important)

Return ONLY a JSON object with this exact structure (no markdown formatting):
{{
  "match_score": number between 1-100,
  "highlights": {{
    "strengths": ["list of compatibility strengths"],
    "concerns": ["list of potential concerns"],
    "summary": "2-3 sentence summary of the match"
  }}
}}"#,
        name = child.name,
        location = field(&child.location),
        occupation = field(&child.occupation),
        education = field(&child.education),
        background = field(&child.background),
        hashkafa = field(&child.hashkafa),
        gender = field(&child.gender),
    )
}

/// Build the narrative-profile instruction combining a library entry's
/// parsed data with the owner's research notes
pub fn build_narrative_prompt(entry: &LibraryEntry, notes: &[String]) -> String {
    let mut resume_lines = String::new();
    resume_lines.push_str(&format!("Uploaded by: {}\n", entry.uploaded_by));

    if let Some(info) = &entry.parsed_data {
        if let Some(name) = &info.name {
            resume_lines.push_str(&format!("Name: {name}\n"));
        }
        if let Some(age) = info.age {
            resume_lines.push_str(&format!("Age: {age}\n"));
        }
        if let Some(location) = &info.location {
            resume_lines.push_str(&format!("Location: {location}\n"));
        }
        if let Some(occupation) = &info.occupation {
            resume_lines.push_str(&format!("Occupation: {occupation}\n"));
        }
        if let Some(education) = &info.education {
            resume_lines.push_str(&format!("Education: {education}\n"));
        }
        if let Some(background) = &info.background {
            resume_lines.push_str(&format!("Background: {background}\n"));
        }
        if let Some(hashkafa) = &info.hashkafa {
            resume_lines.push_str(&format!("Religious Level: {hashkafa}\n"));
        }
    }

    format!(
        r#"You are an expert matchmaker and profile writer. Based on the following resume details and research notes about a person, create a comprehensive and engaging shidduch profile that would be suitable for matchmaking purposes.

RESUME INFORMATION:
{resume_lines}
RESEARCH NOTES FROM PARENT:
{notes}

Please create a warm, professional shidduch profile that:
1. Starts with the person's name and gives a compelling overview
2. Highlights their best qualities, personality traits, and character
3. Describes their background, values, and religious observance
4. Mentions their education, career, and interests
5. Describes what kind of family they come from
6. Includes any other relevant details for matchmaking
7. Maintains a tone that is authentic, warm, and appealing to potential matches

Write this as a flowing narrative profile (3-4 paragraphs) that a shadchan would be proud to present. Begin with something like "Sarah Cohen is an exceptional young woman..." and create a complete picture that combines the resume information with the personal insights from your research."#,
        notes = notes.join("\n\n"),
    )
}
