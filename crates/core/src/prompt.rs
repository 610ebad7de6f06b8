//! Instruction prompt sent to the language model

/// Specializations offered to the model as guidance, with a short hint each.
///
/// This is not an enum the reply is checked against; the model may answer
/// with any label.
pub const SPECIALIZATIONS: &[(&str, Option<&str>)] = &[
    ("Cardiology", Some("heart-related")),
    ("Neurology", Some("nerve, brain issues")),
    ("Pulmonology", Some("lung, breathing")),
    ("Gastroenterology", Some("digestive system")),
    ("Endocrinology", Some("hormonal")),
    ("Dermatology", Some("skin")),
    ("Psychiatry", Some("mental health")),
    ("Rheumatology", Some("joints, autoimmune")),
    ("Urology", Some("urinary system")),
    ("Ophthalmology", Some("eye care")),
    ("Obstetrics/Gynecology", None),
    ("Pediatrics", Some("children's health")),
    ("Geriatrics", Some("elderly care")),
    ("Orthopedics", Some("bone, muscle")),
    ("General Medicine", Some("when symptoms are non-specific")),
    ("Infectious Disease", None),
    ("Oncology", None),
];

const PREAMBLE: &str = "You are a medical diagnostic AI. Carefully analyze the following symptoms and determine the most appropriate medical specialization.";

const INSTRUCTIONS: &str = r#"Your task:
1. Identify the most likely medical specialization needed
2. Provide a confidence level
3. Give a brief reasoning for your recommendation

Respond STRICTLY in this JSON format:
{
    "specialization": "Exact medical specialization (e.g., Cardiology, Neurology, General Medicine)",
    "confidence": "high/medium/low",
    "reasoning": "Concise explanation of how symptoms relate to the specialization"
}"#;

/// Build the prompt for a symptom description.
///
/// Deterministic: the same input always yields the same prompt. The symptom
/// text is embedded verbatim.
pub fn build_prompt(symptoms: &str) -> String {
    let mut prompt = format!(
        "{PREAMBLE}\n\nPatient Symptoms: '{symptoms}'\n\n{INSTRUCTIONS}\n\nKey Specializations to Consider:\n"
    );

    for (name, hint) in SPECIALIZATIONS {
        match hint {
            Some(hint) => prompt.push_str(&format!("- {name} ({hint})\n")),
            None => prompt.push_str(&format!("- {name}\n")),
        }
    }

    prompt
}
