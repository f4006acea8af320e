//! Canned answers for mock mode.
//!
//! The question is lower-cased and checked against an ordered table of
//! keyword groups. The first group with any keyword contained in the
//! question wins; nothing matching falls through to `General`.
//! Order matters: "chest pain and fever" is cardiac, not fever, and
//! "migraine" resolves to headache before neurological is consulted.

/// Topic bucket selected for a canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannedTopic {
    Cardiac,
    Headache,
    Fever,
    Digestive,
    Sleep,
    Medication,
    Emergency,
    Fitness,
    Nutrition,
    MentalHealth,
    Respiratory,
    Skin,
    Eye,
    Ent,
    Musculoskeletal,
    Neurological,
    Endocrine,
    WomensHealth,
    MensHealth,
    Pediatric,
    Geriatric,
    /// Fallback when no keyword matches.
    General,
}

struct TopicRule {
    topic: CannedTopic,
    keywords: &'static [&'static str],
}

/// Evaluated top to bottom. Plain substring matching: "hot" also matches "shot".
static TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: CannedTopic::Cardiac,
        keywords: &["chest pain", "chest discomfort", "heart attack", "cardiac"],
    },
    TopicRule {
        topic: CannedTopic::Headache,
        keywords: &["headache", "migraine", "head pain"],
    },
    TopicRule {
        topic: CannedTopic::Fever,
        keywords: &["fever", "temperature", "hot"],
    },
    TopicRule {
        topic: CannedTopic::Digestive,
        keywords: &["stomach", "nausea", "vomit", "diarrhea"],
    },
    TopicRule {
        topic: CannedTopic::Sleep,
        keywords: &["sleep", "insomnia", "tired", "fatigue"],
    },
    TopicRule {
        topic: CannedTopic::Medication,
        keywords: &["medication", "drug", "pill", "medicine"],
    },
    TopicRule {
        topic: CannedTopic::Emergency,
        keywords: &["emergency", "urgent", "help", "911"],
    },
    TopicRule {
        topic: CannedTopic::Fitness,
        keywords: &["exercise", "workout", "fitness"],
    },
    TopicRule {
        topic: CannedTopic::Nutrition,
        keywords: &["diet", "food", "nutrition", "eat"],
    },
    TopicRule {
        topic: CannedTopic::MentalHealth,
        keywords: &[
            "anxiety", "depression", "stress", "mental", "panic", "bipolar", "ptsd", "ocd",
        ],
    },
    TopicRule {
        topic: CannedTopic::Respiratory,
        keywords: &[
            "cough",
            "breathing",
            "asthma",
            "bronchitis",
            "pneumonia",
            "respiratory",
        ],
    },
    TopicRule {
        topic: CannedTopic::Skin,
        keywords: &[
            "skin", "rash", "acne", "eczema", "psoriasis", "dermatitis", "mole", "wart",
        ],
    },
    TopicRule {
        topic: CannedTopic::Eye,
        keywords: &[
            "eye",
            "vision",
            "blurry",
            "glaucoma",
            "cataract",
            "conjunctivitis",
            "dry eye",
        ],
    },
    TopicRule {
        topic: CannedTopic::Ent,
        keywords: &["ear", "nose", "throat", "sinus", "hearing", "tinnitus", "tonsil"],
    },
    TopicRule {
        topic: CannedTopic::Musculoskeletal,
        keywords: &[
            "back pain", "joint", "arthritis", "muscle", "bone", "spine", "knee", "shoulder",
        ],
    },
    TopicRule {
        topic: CannedTopic::Neurological,
        keywords: &[
            "dizzy",
            "vertigo",
            "seizure",
            "epilepsy",
            "migraine",
            "stroke",
            "neurological",
            "numbness",
        ],
    },
    TopicRule {
        topic: CannedTopic::Endocrine,
        keywords: &[
            "diabetes",
            "thyroid",
            "hormone",
            "blood sugar",
            "insulin",
            "metabolism",
            "weight",
        ],
    },
    TopicRule {
        topic: CannedTopic::WomensHealth,
        keywords: &[
            "pregnancy",
            "pregnant",
            "menstrual",
            "period",
            "menopause",
            "breast",
            "gynecological",
            "ovarian",
            "uterine",
            "morning sickness",
            "prenatal",
        ],
    },
    TopicRule {
        topic: CannedTopic::MensHealth,
        keywords: &["prostate", "testosterone", "erectile", "male", "andropause"],
    },
    TopicRule {
        topic: CannedTopic::Pediatric,
        keywords: &[
            "baby",
            "infant",
            "child",
            "pediatric",
            "toddler",
            "kids",
            "vaccination",
            "immunization",
        ],
    },
    TopicRule {
        topic: CannedTopic::Geriatric,
        keywords: &[
            "elderly", "senior", "aging", "dementia", "alzheimer", "falls", "frailty",
        ],
    },
];

/// Placeholder in the general answer replaced with the user's question.
const QUESTION_PLACEHOLDER: &str = "{question}";

impl CannedTopic {
    /// Fixed answer text for this topic. `General` still contains the
    /// question placeholder; use [`canned_answer`] to render it.
    pub fn template(self) -> &'static str {
        match self {
            Self::Cardiac => include_str!("responses/cardiac.txt"),
            Self::Headache => include_str!("responses/headache.txt"),
            Self::Fever => include_str!("responses/fever.txt"),
            Self::Digestive => include_str!("responses/digestive.txt"),
            Self::Sleep => include_str!("responses/sleep.txt"),
            Self::Medication => include_str!("responses/medication.txt"),
            Self::Emergency => include_str!("responses/emergency.txt"),
            Self::Fitness => include_str!("responses/fitness.txt"),
            Self::Nutrition => include_str!("responses/nutrition.txt"),
            Self::MentalHealth => include_str!("responses/mental_health.txt"),
            Self::Respiratory => include_str!("responses/respiratory.txt"),
            Self::Skin => include_str!("responses/skin.txt"),
            Self::Eye => include_str!("responses/eye.txt"),
            Self::Ent => include_str!("responses/ent.txt"),
            Self::Musculoskeletal => include_str!("responses/musculoskeletal.txt"),
            Self::Neurological => include_str!("responses/neurological.txt"),
            Self::Endocrine => include_str!("responses/endocrine.txt"),
            Self::WomensHealth => include_str!("responses/womens_health.txt"),
            Self::MensHealth => include_str!("responses/mens_health.txt"),
            Self::Pediatric => include_str!("responses/pediatric.txt"),
            Self::Geriatric => include_str!("responses/geriatric.txt"),
            Self::General => include_str!("responses/general.txt"),
        }
    }
}

/// Pick the topic for a question. First matching rule wins.
pub fn select_topic(question: &str) -> CannedTopic {
    let lower = question.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|rule| rule.topic)
        .unwrap_or(CannedTopic::General)
}

/// Render the canned answer for a question.
pub fn canned_answer(question: &str) -> (CannedTopic, String) {
    let topic = select_topic(question);
    let text = match topic {
        CannedTopic::General => topic.template().replace(QUESTION_PLACEHOLDER, question),
        _ => topic.template().to_string(),
    };
    (topic, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chest_pain_selects_cardiac() {
        let (topic, text) = canned_answer("I have chest pain since this morning");
        assert_eq!(topic, CannedTopic::Cardiac);
        assert_eq!(text, include_str!("responses/cardiac.txt"));
        assert!(text.starts_with("🚨 URGENT: Chest pain requires immediate medical attention!"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(select_topic("CHEST PAIN"), CannedTopic::Cardiac);
        assert_eq!(select_topic("Insomnia again"), CannedTopic::Sleep);
    }

    #[test]
    fn first_match_wins_when_several_groups_match() {
        // fever and cardiac both match; cardiac is earlier
        assert_eq!(select_topic("chest pain and a fever"), CannedTopic::Cardiac);
        // migraine is listed under headache and neurological
        assert_eq!(select_topic("migraine with numbness"), CannedTopic::Headache);
        // "female" contains "male"; women's health comes first
        assert_eq!(select_topic("female menopause symptoms"), CannedTopic::WomensHealth);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "shot" contains "hot"
        assert_eq!(select_topic("is a flu shot safe?"), CannedTopic::Fever);
    }

    #[test]
    fn each_topic_reachable_by_a_keyword() {
        let cases = [
            ("my heart attack risk", CannedTopic::Cardiac),
            ("bad headache", CannedTopic::Headache),
            ("high fever", CannedTopic::Fever),
            ("nausea after lunch", CannedTopic::Digestive),
            ("always tired", CannedTopic::Sleep),
            ("missed a pill", CannedTopic::Medication),
            ("call 911?", CannedTopic::Emergency),
            ("best workout routine", CannedTopic::Fitness),
            ("low carb diet", CannedTopic::Nutrition),
            ("panic attacks", CannedTopic::MentalHealth),
            ("persistent cough", CannedTopic::Respiratory),
            ("itchy rash", CannedTopic::Skin),
            ("blurry vision", CannedTopic::Eye),
            ("sore throat", CannedTopic::Ent),
            ("knee swelling", CannedTopic::Musculoskeletal),
            ("feeling dizzy", CannedTopic::Neurological),
            ("thyroid levels", CannedTopic::Endocrine),
            ("prenatal vitamins", CannedTopic::WomensHealth),
            ("prostate screening", CannedTopic::MensHealth),
            ("toddler vaccination schedule", CannedTopic::Pediatric),
            ("dementia signs in elderly", CannedTopic::Geriatric),
        ];
        for (question, expected) in cases {
            assert_eq!(select_topic(question), expected, "question: {question}");
        }
    }

    #[test]
    fn unknown_question_falls_back_to_general() {
        let question = "What is the capital of France?";
        let (topic, text) = canned_answer(question);
        assert_eq!(topic, CannedTopic::General);
        assert_eq!(
            text,
            include_str!("responses/general.txt").replace("{question}", question)
        );
        assert!(text.starts_with("Thank you for your health question: \"What is the capital of France?\""));
    }

    #[test]
    fn topic_answers_do_not_contain_placeholder() {
        for rule in TOPIC_RULES {
            assert!(!rule.topic.template().contains(QUESTION_PLACEHOLDER));
            assert!(!rule.topic.template().is_empty());
        }
        assert!(CannedTopic::General.template().contains(QUESTION_PLACEHOLDER));
    }
}
