use std::fmt::Write as _;

use crate::advisor::profile::UserProfile;
use crate::catalog::PolicyRecord;
use crate::format::format_inr;

const ADVISOR_PERSONA: &str =
    "You are an expert Indian insurance advisor. Provide clear, concise advice.";
const QUESTION_PERSONA: &str = "You are a helpful Indian insurance expert. Answer questions clearly and concisely in 2-3 sentences. Focus on practical advice for Indian customers.";

pub(crate) fn recommendation_prompt(
    profile: &UserProfile,
    policy: &PolicyRecord,
    risk_score: f64,
) -> String {
    let mut user = String::new();
    let _ = writeln!(user, "Customer Profile:");
    let _ = writeln!(user, "- Age: {} years", profile.age());
    let _ = writeln!(user, "- Annual Income: ₹{} LPA", profile.income_lpa());
    let _ = writeln!(user, "- Health: {}", profile.health());
    let _ = writeln!(user, "- Goal: {}", profile.goal());
    let _ = writeln!(user, "- Risk Score: {risk_score}/10");
    let _ = writeln!(user);
    let _ = writeln!(
        user,
        "Recommended Policy: {} with ₹{} lakhs coverage for ₹{} premium.",
        policy.policy_type, policy.coverage_lakhs, policy.premium_inr
    );
    let _ = writeln!(user);
    let _ = write!(
        user,
        "Explain in 2-3 sentences why this policy is suitable. Focus on benefits and value."
    );

    chat(ADVISOR_PERSONA, &user)
}

pub(crate) fn question_prompt(question: &str) -> String {
    chat(QUESTION_PERSONA, question.trim())
}

fn chat(system: &str, user: &str) -> String {
    format!("<|system|>\n{system}\n\n<|user|>\n{user}\n\n<|assistant|>")
}

pub(crate) fn fallback_rationale(
    profile: &UserProfile,
    policy: &PolicyRecord,
    risk_score: f64,
) -> String {
    let mut text = String::from("Based on your profile analysis:\n");
    let _ = writeln!(
        text,
        "- Age: {} years matches the typical age group for {}",
        profile.age(),
        policy.policy_type
    );
    let _ = writeln!(
        text,
        "- Coverage: ₹{} lakhs provides adequate protection",
        policy.coverage_lakhs
    );
    let _ = writeln!(
        text,
        "- Premium: {} is within reasonable range for your income",
        format_inr(policy.premium_inr)
    );
    let _ = writeln!(text, "- Risk Score: {risk_score}/10 indicates your risk profile");
    text.push_str("\nThis recommendation is based on data analysis of similar customer profiles.");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::profile::ProfileRequest;
    use crate::catalog::PolicyType;

    fn profile() -> UserProfile {
        ProfileRequest::new(34, 18.5, "Average", "secure my family")
            .validate()
            .expect("valid")
    }

    #[test]
    fn recommendation_prompt_carries_profile_and_policy() {
        let policy = PolicyRecord::new(PolicyType::TermLife, 50.0, 12_000.0, 35);
        let prompt = recommendation_prompt(&profile(), &policy, 2.03);

        assert!(prompt.starts_with("<|system|>\nYou are an expert Indian insurance advisor."));
        assert!(prompt.contains("- Age: 34 years"));
        assert!(prompt.contains("- Annual Income: ₹18.5 LPA"));
        assert!(prompt.contains("- Health: Average"));
        assert!(prompt.contains("- Risk Score: 2.03/10"));
        assert!(prompt.contains("Recommended Policy: Term Life with ₹50 lakhs coverage for ₹12000 premium."));
        assert!(prompt.ends_with("<|assistant|>"));
    }

    #[test]
    fn fallback_rationale_formats_premium() {
        let policy = PolicyRecord::new(PolicyType::Health, 10.0, 8_500.0, 35);
        let text = fallback_rationale(&profile(), &policy, 2.03);

        assert!(text.contains("typical age group for Health"));
        assert!(text.contains("- Premium: ₹8,500 is within reasonable range"));
        assert!(text.ends_with("similar customer profiles."));
    }

    #[test]
    fn question_prompt_trims_the_question() {
        let prompt = question_prompt("  What is a waiting period?  ");
        assert!(prompt.contains("<|user|>\nWhat is a waiting period?\n\n<|assistant|>"));
    }
}
