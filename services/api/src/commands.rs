use crate::infra::build_advisor;
use clap::Args;
use policy_advisor::advisor::comparison::PolicySide;
use policy_advisor::advisor::{
    Explanation, MarketInsights, PolicyAdvisor, PolicyComparison, PremiumEstimate,
    PremiumQuoteRequest, ProfileRequest, RecommendationResult,
};
use policy_advisor::config::AppConfig;
use policy_advisor::error::AppError;
use policy_advisor::format::format_inr;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Override the configured catalog CSV path
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Age in years (18-100)
    #[arg(long)]
    pub(crate) age: i64,
    /// Annual income in lakhs per annum
    #[arg(long)]
    pub(crate) income: f64,
    /// Self-reported health: Good, Average, or Poor
    #[arg(long, default_value = "Good")]
    pub(crate) health: String,
    /// What the customer wants the policy to achieve
    #[arg(long)]
    pub(crate) goal: String,
    /// Ask the configured text generator for a rationale
    #[arg(long)]
    pub(crate) explain: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Coverage amount in lakhs
    #[arg(long)]
    pub(crate) coverage: f64,
    /// Policy type label, e.g. "Term Life"
    #[arg(long, default_value = "Term Life")]
    pub(crate) policy_type: String,
    /// Health label: Good, Average, or Poor
    #[arg(long, default_value = "Good")]
    pub(crate) health: String,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Catalog position of the first policy
    #[arg(long)]
    pub(crate) first: usize,
    /// Catalog position of the second policy
    #[arg(long)]
    pub(crate) second: usize,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// The question to put to the assistant
    pub(crate) question: String,
}

fn advisor(catalog: Option<PathBuf>) -> Result<PolicyAdvisor, AppError> {
    let config = AppConfig::load()?;
    Ok(build_advisor(&config, catalog))
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let advisor = advisor(args.catalog.catalog)?;
    let request = ProfileRequest::new(args.age, args.income, args.health, args.goal);
    if args.explain {
        let advice = advisor.advise(&request)?;
        print!(
            "{}",
            render_recommendation(&advice.recommendation, Some(&advice.explanation))
        );
    } else {
        let result = advisor.recommend(&request)?;
        print!("{}", render_recommendation(&result, None));
    }
    Ok(())
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let request = PremiumQuoteRequest {
        age: args.age,
        coverage_lakhs: args.coverage,
        policy_type: args.policy_type,
        health: args.health,
    };
    let estimate = request.estimate();
    print!("{}", render_estimate(&request, &estimate));
    Ok(())
}

pub(crate) fn run_insights(args: CatalogArgs) -> Result<(), AppError> {
    let insights = advisor(args.catalog)?.insights()?;
    print!("{}", render_insights(&insights));
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let comparison = advisor(args.catalog.catalog)?.compare(args.first, args.second)?;
    print!("{}", render_comparison(&comparison));
    Ok(())
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let answer = advisor(None)?.answer_question(&args.question)?;
    println!("{answer}");
    Ok(())
}

pub(crate) fn render_recommendation(
    result: &RecommendationResult,
    explanation: Option<&Explanation>,
) -> String {
    let best = &result.best_policy;
    let mut out = String::new();

    let _ = writeln!(out, "Recommended policy");
    let _ = writeln!(
        out,
        "- {} | {} lakhs cover | {} per year",
        best.policy.policy_type,
        best.policy.coverage_lakhs,
        format_inr(best.policy.premium_inr)
    );
    let _ = writeln!(
        out,
        "- Risk score {}/10 | {} candidate policies considered",
        result.risk_score, result.total_candidates
    );

    let _ = writeln!(out, "\nShortlist");
    for (rank, ranked) in result.shortlist.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} | {} lakhs | {} | affordability {:.2} | age gap {}",
            rank + 1,
            ranked.policy.policy_type,
            ranked.policy.coverage_lakhs,
            format_inr(ranked.policy.premium_inr),
            ranked.affordability_score,
            ranked.age_diff
        );
    }

    if let Some(explanation) = explanation {
        let _ = writeln!(out, "\nWhy this policy ({:?})", explanation.source);
        let _ = writeln!(out, "{}", explanation.text);
    }
    out
}

pub(crate) fn render_estimate(request: &PremiumQuoteRequest, estimate: &PremiumEstimate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Estimated annual premium: {}",
        format_inr(estimate.estimated_premium as f64)
    );
    let _ = writeln!(
        out,
        "- {} lakhs of {} cover at age {} ({} health)",
        request.coverage_lakhs, request.policy_type, request.age, request.health
    );
    let _ = writeln!(
        out,
        "- base rate {} | age factor {} | health factor {}",
        estimate.base_rate, estimate.age_factor, estimate.health_factor
    );
    out
}

pub(crate) fn render_insights(insights: &MarketInsights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Catalog insights ({} policies)", insights.total_policies);

    let _ = writeln!(out, "\nPolicy mix");
    for share in &insights.type_distribution {
        let _ = writeln!(out, "  - {}: {}", share.policy_type, share.count);
    }

    let _ = writeln!(out, "\nCoverage by type");
    for stats in &insights.coverage_by_type {
        let _ = writeln!(
            out,
            "  - {}: {}-{} lakhs (mean {}) | mean premium {}",
            stats.policy_type,
            stats.min_coverage_lakhs,
            stats.max_coverage_lakhs,
            stats.mean_coverage_lakhs,
            format_inr(stats.mean_premium_inr)
        );
    }

    let _ = writeln!(out, "\nAverage premium by age");
    for entry in &insights.premium_by_age {
        let _ = writeln!(out, "  - {}: {}", entry.age, format_inr(entry.average_premium));
    }

    if let Some(regions) = &insights.regional {
        let _ = writeln!(out, "\nRegions");
        for region in regions {
            let _ = writeln!(
                out,
                "  - {}: {} avg premium | {} lakhs avg cover",
                region.region,
                format_inr(region.average_premium),
                region.average_coverage_lakhs
            );
        }
    }
    out
}

pub(crate) fn render_comparison(comparison: &PolicyComparison) -> String {
    let mut out = String::new();
    for (label, policy, ratio) in [
        ("Policy 1", &comparison.first, comparison.first_value_ratio),
        ("Policy 2", &comparison.second, comparison.second_value_ratio),
    ] {
        let _ = writeln!(
            out,
            "{label}: {} | {} lakhs | {} | value ratio {:.1}",
            policy.policy_type,
            policy.coverage_lakhs,
            format_inr(policy.premium_inr),
            ratio
        );
    }

    let better = match comparison.better_value {
        PolicySide::First => "Policy 1",
        PolicySide::Second => "Policy 2",
    };
    let _ = writeln!(out, "Better value: {better}");
    let _ = writeln!(out, "{}", comparison.verdict.summary(comparison));
    out
}
