//! Narrative report generation.
//!
//! Two strategies behind one `produce` call: the primary path asks the
//! configured chat-completion endpoint for prose, the fallback assembles the
//! same four sections from per-language string tables. The fallback is total,
//! so callers always end up with a non-empty markdown report.

use tracing::{debug, warn};

use crate::domain::models::{Lang, PageSignals, ScoreTriple};
use crate::service::completion::CompletionClient;

pub struct Narrator {
    completion: Option<CompletionClient>,
}

impl Narrator {
    pub fn new(completion: Option<CompletionClient>) -> Self {
        Self { completion }
    }

    /// Produce the markdown report for an audited page.
    ///
    /// Never fails: a dead or unconfigured completion endpoint degrades to
    /// the templated report.
    pub async fn produce(
        &self,
        url: &str,
        signals: &PageSignals,
        scores: &ScoreTriple,
        lang: Lang,
    ) -> String {
        if let Some(client) = &self.completion {
            let (system, user) = build_prompt(url, signals, scores, lang);
            match client.generate(&system, &user).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("narrative generated by completion endpoint");
                    return text;
                }
                Ok(_) => warn!("completion endpoint returned an empty narrative"),
                Err(e) => warn!("narrative generation failed, using fallback: {e:#}"),
            }
        }
        fallback_report(url, signals, scores, lang)
    }
}

// ============================================================================
// PROMPT CONSTRUCTION
// ============================================================================

/// Build the (system, user) message pair for the completion endpoint.
/// Every extracted signal and score is embedded so the model never has to
/// guess at page content.
pub fn build_prompt(
    url: &str,
    signals: &PageSignals,
    scores: &ScoreTriple,
    lang: Lang,
) -> (String, String) {
    let system = match lang {
        Lang::En => {
            "You are an expert SEO consultant. Write a concise audit report in English \
             as markdown with exactly four sections titled \"Summary\", \"Strengths\", \
             \"Critical Issues\" and \"Recommendations\". Base every statement strictly \
             on the data provided."
        }
        Lang::Fr => {
            "Tu es un consultant SEO expert. Rédige un rapport d'audit concis en français \
             au format markdown avec exactement quatre sections intitulées \"Résumé\", \
             \"Points forts\", \"Problèmes critiques\" et \"Recommandations\". Appuie \
             chaque affirmation strictement sur les données fournies."
        }
    };

    let user = format!(
        "URL: {url}\n\
         Global score: {global}/100\n\
         Mobile score: {mobile}/100\n\
         Desktop score: {desktop}/100\n\
         Title: {title}\n\
         Meta description: {description}\n\
         H1 count: {h1}\n\
         H2 count: {h2}\n\
         Images: {images} total, {without_alt} without alt attribute\n\
         Mobile viewport tag: {viewport}\n\
         Canonical tag: {canonical}\n",
        url = url,
        global = scores.global,
        mobile = scores.mobile,
        desktop = scores.desktop,
        title = signals.title.as_deref().unwrap_or("(none)"),
        description = signals.meta_description.as_deref().unwrap_or("(none)"),
        h1 = signals.h1_count,
        h2 = signals.h2_count,
        images = signals.total_images,
        without_alt = signals.images_without_alt,
        viewport = if signals.has_viewport { "yes" } else { "no" },
        canonical = if signals.has_canonical { "yes" } else { "no" },
    );

    (system.to_string(), user)
}

// ============================================================================
// FALLBACK TEMPLATE
// ============================================================================

/// Per-language phrases for the templated report.
struct ReportStrings {
    summary: &'static str,
    strengths: &'static str,
    critical: &'static str,
    recommendations: &'static str,
    overall_line: &'static str,
    title_ok: &'static str,
    description_ok: &'static str,
    single_h1: &'static str,
    images_ok: &'static str,
    viewport_ok: &'static str,
    canonical_ok: &'static str,
    no_strengths: &'static str,
    title_missing: &'static str,
    title_long: &'static str,
    description_missing: &'static str,
    description_long: &'static str,
    h1_missing: &'static str,
    h1_multiple: &'static str,
    images_missing_alt: &'static str,
    viewport_missing: &'static str,
    canonical_missing: &'static str,
    no_issues: &'static str,
    keep_it_up: &'static str,
}

const EN: ReportStrings = ReportStrings {
    summary: "Summary",
    strengths: "Strengths",
    critical: "Critical Issues",
    recommendations: "Recommendations",
    overall_line: "scores {global}/100 overall ({mobile}/100 mobile, {desktop}/100 desktop).",
    title_ok: "The title tag is present and well-sized.",
    description_ok: "The meta description is present and well-sized.",
    single_h1: "The page uses exactly one H1 heading.",
    images_ok: "All images declare an alt attribute.",
    viewport_ok: "A mobile viewport is configured.",
    canonical_ok: "A canonical URL is declared.",
    no_strengths: "None of the audited signals passed.",
    title_missing: "The page has no title tag.",
    title_long: "The title tag exceeds 60 characters.",
    description_missing: "The page has no meta description.",
    description_long: "The meta description exceeds 160 characters.",
    h1_missing: "The page has no H1 heading.",
    h1_multiple: "The page has more than one H1 heading.",
    images_missing_alt: "{count} image(s) are missing an alt attribute.",
    viewport_missing: "No mobile viewport tag was found.",
    canonical_missing: "No canonical tag was found.",
    no_issues: "No critical issues were detected.",
    keep_it_up: "Keep the current structure; all audited signals look healthy.",
};

const FR: ReportStrings = ReportStrings {
    summary: "Résumé",
    strengths: "Points forts",
    critical: "Problèmes critiques",
    recommendations: "Recommandations",
    overall_line: "obtient {global}/100 au global ({mobile}/100 mobile, {desktop}/100 desktop).",
    title_ok: "La balise title est présente et de bonne longueur.",
    description_ok: "La meta description est présente et de bonne longueur.",
    single_h1: "La page utilise exactement un titre H1.",
    images_ok: "Toutes les images déclarent un attribut alt.",
    viewport_ok: "Un viewport mobile est configuré.",
    canonical_ok: "Une URL canonique est déclarée.",
    no_strengths: "Aucun des signaux audités n'est satisfaisant.",
    title_missing: "La page n'a pas de balise title.",
    title_long: "La balise title dépasse 60 caractères.",
    description_missing: "La page n'a pas de meta description.",
    description_long: "La meta description dépasse 160 caractères.",
    h1_missing: "La page n'a pas de titre H1.",
    h1_multiple: "La page contient plusieurs titres H1.",
    images_missing_alt: "{count} image(s) sans attribut alt.",
    viewport_missing: "Aucune balise viewport mobile trouvée.",
    canonical_missing: "Aucune balise canonique trouvée.",
    no_issues: "Aucun problème critique détecté.",
    keep_it_up: "Conservez la structure actuelle ; tous les signaux audités sont sains.",
};

/// Deterministic, network-free report. Total over any signal/score input.
pub fn fallback_report(
    url: &str,
    signals: &PageSignals,
    scores: &ScoreTriple,
    lang: Lang,
) -> String {
    let strings = match lang {
        Lang::En => &EN,
        Lang::Fr => &FR,
    };

    let mut strengths = Vec::new();
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    match signals.title.as_deref() {
        None => {
            issues.push(strings.title_missing.to_string());
            recommendations.push(strings.title_missing.to_string());
        }
        Some(title) if title.chars().count() > 60 => {
            issues.push(strings.title_long.to_string());
            recommendations.push(strings.title_long.to_string());
        }
        Some(_) => strengths.push(strings.title_ok.to_string()),
    }

    match signals.meta_description.as_deref() {
        None => {
            issues.push(strings.description_missing.to_string());
            recommendations.push(strings.description_missing.to_string());
        }
        Some(desc) if desc.chars().count() > 160 => {
            issues.push(strings.description_long.to_string());
            recommendations.push(strings.description_long.to_string());
        }
        Some(_) => strengths.push(strings.description_ok.to_string()),
    }

    if signals.h1_count == 0 {
        issues.push(strings.h1_missing.to_string());
        recommendations.push(strings.h1_missing.to_string());
    } else if signals.h1_count > 1 {
        issues.push(strings.h1_multiple.to_string());
        recommendations.push(strings.h1_multiple.to_string());
    } else {
        strengths.push(strings.single_h1.to_string());
    }

    if signals.images_without_alt > 0 {
        let line = strings
            .images_missing_alt
            .replace("{count}", &signals.images_without_alt.to_string());
        issues.push(line.clone());
        recommendations.push(line);
    } else if signals.total_images > 0 {
        strengths.push(strings.images_ok.to_string());
    }

    if signals.has_viewport {
        strengths.push(strings.viewport_ok.to_string());
    } else {
        issues.push(strings.viewport_missing.to_string());
        recommendations.push(strings.viewport_missing.to_string());
    }

    if signals.has_canonical {
        strengths.push(strings.canonical_ok.to_string());
    } else {
        issues.push(strings.canonical_missing.to_string());
        recommendations.push(strings.canonical_missing.to_string());
    }

    if strengths.is_empty() {
        strengths.push(strings.no_strengths.to_string());
    }
    if issues.is_empty() {
        issues.push(strings.no_issues.to_string());
    }
    if recommendations.is_empty() {
        recommendations.push(strings.keep_it_up.to_string());
    }

    let overall = strings
        .overall_line
        .replace("{global}", &scores.global.to_string())
        .replace("{mobile}", &scores.mobile.to_string())
        .replace("{desktop}", &scores.desktop.to_string());

    format!(
        "## {summary}\n\n{url} {overall}\n\n\
         ## {strengths_header}\n\n{strengths}\n\n\
         ## {critical_header}\n\n{issues}\n\n\
         ## {recommendations_header}\n\n{recommendations}\n",
        summary = strings.summary,
        url = url,
        overall = overall,
        strengths_header = strings.strengths,
        strengths = bullet_list(&strengths),
        critical_header = strings.critical,
        issues = bullet_list(&issues),
        recommendations_header = strings.recommendations,
        recommendations = bullet_list(&recommendations),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
