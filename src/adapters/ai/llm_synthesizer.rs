//! LLM-backed ScoreSynthesizer.
//!
//! Builds the AUG analysis prompt, asks the AI provider for a JSON
//! breakdown, and validates it against the criteria catalog. Free text
//! never leaves this module: callers get a validated breakdown or an error.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::domain::aug::{
    Category, CategoryBreakdown, CategoryBreakdowns, CriteriaCatalog, CriterionEntry,
    CriterionScore, Priority, Recommendation, CRITERIA_PER_CATEGORY, CRITERION_MAX,
};
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, RequestMetadata, ScoreSynthesizer, SynthesisError,
    SynthesisRequest, SynthesizedAnalysis,
};

const SYSTEM_PROMPT: &str =
    "You are an expert architectural analyst. Return only valid JSON responses.";

/// Sampling settings for synthesis calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 3000,
        }
    }
}

/// Score synthesizer that asks a language model.
pub struct LlmScoreSynthesizer {
    ai_provider: Arc<dyn AIProvider>,
    catalog: &'static CriteriaCatalog,
    settings: SynthesisSettings,
}

impl LlmScoreSynthesizer {
    pub fn new(ai_provider: Arc<dyn AIProvider>, settings: SynthesisSettings) -> Self {
        Self {
            ai_provider,
            catalog: CriteriaCatalog::aug(),
            settings,
        }
    }

    fn metadata(request: &SynthesisRequest) -> RequestMetadata {
        let metadata = RequestMetadata::new(format!("aug-synthesis-{}", uuid::Uuid::new_v4()));
        match request.project_id {
            Some(id) => metadata.with_project(id),
            None => metadata,
        }
    }

    /// Creates the analysis prompt for one project.
    fn create_analysis_prompt(&self, request: &SynthesisRequest) -> String {
        fn or_unknown(value: Option<&str>) -> &str {
            value.filter(|v| !v.trim().is_empty()).unwrap_or("Unknown")
        }
        fn metric(value: Option<f64>) -> String {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "Not specified".to_string())
        }

        let criteria_section = Category::ALL
            .iter()
            .map(|category| {
                let lines = self
                    .catalog
                    .for_category(*category)
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{}. {}: {}", i + 1, c.name, c.description))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{} CRITERIA:\n{}", category.label().to_uppercase(), lines)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let schema_section = Category::ALL
            .iter()
            .map(|category| {
                let entries = self
                    .catalog
                    .for_category(*category)
                    .iter()
                    .map(|c| {
                        format!(
                            r#"        {{"name": "{}", "score": 14, "analysis": "..."}}"#,
                            c.name
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(",\n");
                format!(
                    "    \"{}\": {{\n      \"score\": 84,\n      \"criteria\": [\n{}\n      ]\n    }}",
                    category.key(),
                    entries
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");

        let metrics = &request.metrics;
        format!(
            r#"Analyze the following project against the AUG (Architectural, Urban, Green) sustainability framework.

PROJECT INFORMATION:
Name: {name}
Location: {location}
Architect: {architect}
Year: {year}
Description: {description}

PROJECT METRICS:
Plot Area: {plot_area} m²
Floor Area: {floor_area} m²
Building Height: {height} m
Number of Units: {units}
Units Per Hectare (UPH): {uph}
Floor Area Ratio (FAR): {far}
Densification Type: {densification}
Green Space Ratio: {green}%

ANALYSIS FRAMEWORK:
The AUG framework evaluates projects across 18 criteria (6 Architectural, 6 Urban, 6 Green).
Each criterion is scored from 0-20 points based on 4 sub-criteria (0-5 points each).

SCORING GUIDELINES:
- Excellent (16-20): Outstanding performance, innovative solutions, best practices
- Good (12-15): Above average performance, solid implementation
- Fair (8-11): Average performance, meets basic requirements
- Poor (0-7): Below average, significant improvements needed

{criteria}

INSTRUCTIONS:
1. Score every one of the 18 criteria from 0 to 20 using the exact criterion names above
2. Use the metrics to support qualitative judgements
3. Give a brief analysis for each criterion
4. Add prioritised recommendations (High, Medium or Low) and short insights

Return ONLY a valid JSON object in this format:
{{
  "categories": {{
{schema}
  }},
  "recommendations": [
    {{"category": "Green", "priority": "High", "suggestion": "..."}}
  ],
  "insights": ["..."]
}}"#,
            name = request.name,
            location = or_unknown(request.location.as_deref()),
            architect = or_unknown(request.architect.as_deref()),
            year = request
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            description = request
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description provided"),
            plot_area = metric(metrics.plot_area),
            floor_area = metric(metrics.floor_area),
            height = metric(metrics.building_height),
            units = metrics
                .unit_count
                .map(|u| u.to_string())
                .unwrap_or_else(|| "Not specified".to_string()),
            uph = metric(metrics.units_per_hectare),
            far = metric(metrics.floor_area_ratio),
            densification = or_unknown(metrics.densification_type.as_deref()),
            green = metric(metrics.green_space_ratio),
            criteria = criteria_section,
            schema = schema_section,
        )
    }

    /// Parses and validates a raw model reply.
    pub fn parse_payload(&self, raw: &str) -> Result<SynthesizedAnalysis, SynthesisError> {
        let json = extract_json(raw)
            .ok_or_else(|| SynthesisError::malformed("no JSON object in response"))?;
        let parsed: Value = serde_json::from_str(json)
            .map_err(|e| SynthesisError::malformed(format!("invalid JSON: {}", e)))?;

        let categories = parsed
            .get("categories")
            .and_then(Value::as_object)
            .ok_or_else(|| SynthesisError::malformed("missing 'categories' object"))?;

        if let Some(extra) = categories
            .keys()
            .find(|k| k.parse::<Category>().is_err())
        {
            return Err(SynthesisError::malformed(format!("unexpected category '{}'", extra)));
        }

        let breakdowns = CategoryBreakdowns {
            architectural: self.parse_category(categories.get("architectural"), Category::Architectural)?,
            urban: self.parse_category(categories.get("urban"), Category::Urban)?,
            green: self.parse_category(categories.get("green"), Category::Green)?,
        };

        Ok(SynthesizedAnalysis {
            categories: breakdowns,
            recommendations: parse_recommendations(parsed.get("recommendations")),
            insights: parse_insights(parsed.get("insights")),
        })
    }

    fn parse_category(
        &self,
        value: Option<&Value>,
        category: Category,
    ) -> Result<CategoryBreakdown, SynthesisError> {
        let value = value.ok_or_else(|| {
            SynthesisError::malformed(format!("missing '{}' category", category.key()))
        })?;
        let criteria = value
            .get("criteria")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SynthesisError::malformed(format!("'{}' has no criteria array", category.key()))
            })?;

        if criteria.len() != CRITERIA_PER_CATEGORY {
            return Err(SynthesisError::malformed(format!(
                "'{}' has {} criteria, expected {}",
                category.key(),
                criteria.len(),
                CRITERIA_PER_CATEGORY
            )));
        }

        let mut by_key = Vec::with_capacity(CRITERIA_PER_CATEGORY);
        let mut seen = HashSet::new();
        for entry in criteria {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| SynthesisError::malformed("criterion without a name"))?;
            let criterion = self.catalog.find_by_name(category, name).ok_or_else(|| {
                SynthesisError::malformed(format!(
                    "unknown {} criterion '{}'",
                    category.key(),
                    name
                ))
            })?;
            if !seen.insert(criterion.key) {
                return Err(SynthesisError::malformed(format!(
                    "duplicate criterion '{}'",
                    criterion.name
                )));
            }
            let score = parse_criterion_score(entry.get("score"), criterion.name)?;
            let analysis = entry
                .get("analysis")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            by_key.push((criterion.key, CriterionEntry {
                name: criterion.name.to_string(),
                score,
                analysis,
            }));
        }

        // Catalog order regardless of the order the model used.
        let ordered = self
            .catalog
            .for_category(category)
            .iter()
            .filter_map(|c| {
                by_key
                    .iter()
                    .position(|(key, _)| *key == c.key)
                    .map(|i| by_key[i].1.clone())
            })
            .collect::<Vec<_>>();

        let breakdown = CategoryBreakdown::from_entries(ordered)
            .map_err(|e| SynthesisError::malformed(e.to_string()))?;

        if let Some(reported) = value.get("score").and_then(Value::as_f64) {
            if reported != breakdown.score().value() as f64 {
                debug!(
                    category = %category,
                    reported,
                    computed = breakdown.score().value(),
                    "Ignoring model category score that differs from criterion sum"
                );
            }
        }

        Ok(breakdown)
    }
}

#[async_trait]
impl ScoreSynthesizer for LlmScoreSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAnalysis, SynthesisError> {
        let prompt = self.create_analysis_prompt(request);
        debug!(project = %request.name, prompt_len = prompt.len(), "Requesting AUG synthesis");

        let completion = CompletionRequest::new(Self::metadata(request))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.ai_provider.complete(completion).await?;
        debug!(
            project = %request.name,
            model = %response.model,
            response_len = response.content.len(),
            "AUG synthesis response received"
        );

        self.parse_payload(&response.content)
    }
}

/// Synthesizer used when no model is configured. Always fails, so every
/// analysis takes the fallback path.
#[derive(Debug, Clone, Default)]
pub struct UnavailableSynthesizer;

#[async_trait]
impl ScoreSynthesizer for UnavailableSynthesizer {
    async fn synthesize(&self, _request: &SynthesisRequest) -> Result<SynthesizedAnalysis, SynthesisError> {
        Err(SynthesisError::Unavailable(
            "no AI provider configured".to_string(),
        ))
    }
}

/// Locates the JSON object in a model reply.
///
/// Strips a Markdown code fence if present, then takes everything from the
/// first `{` to the last `}`.
pub fn extract_json(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let text = unfenced.strip_suffix("```").unwrap_or(unfenced);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_criterion_score(value: Option<&Value>, name: &str) -> Result<CriterionScore, SynthesisError> {
    let number = value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite())
        .ok_or_else(|| SynthesisError::malformed(format!("'{}' has no numeric score", name)))?;

    if !(0.0..=CRITERION_MAX as f64).contains(&number) {
        return Err(SynthesisError::malformed(format!(
            "'{}' score {} outside [0, {}]",
            name, number, CRITERION_MAX
        )));
    }

    CriterionScore::try_new(number.trunc() as u8).map_err(|e| SynthesisError::malformed(e.to_string()))
}

fn parse_recommendations(value: Option<&Value>) -> Vec<Recommendation> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let category = item.get("category")?.as_str()?.parse::<Category>().ok()?;
            let priority = match item.get("priority")?.as_str()?.to_ascii_lowercase().as_str() {
                "high" => Priority::High,
                "medium" => Priority::Medium,
                "low" => Priority::Low,
                _ => return None,
            };
            let suggestion = item.get("suggestion")?.as_str()?.trim();
            (!suggestion.is_empty()).then(|| Recommendation::new(category, priority, suggestion))
        })
        .collect()
}

fn parse_insights(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use serde_json::json;

    /// A well-formed payload where every criterion scores `score`.
    fn valid_payload(score: u8) -> Value {
        let catalog = CriteriaCatalog::aug();
        let mut categories = serde_json::Map::new();
        for category in Category::ALL {
            let criteria: Vec<Value> = catalog
                .for_category(category)
                .iter()
                .map(|c| json!({"name": c.name, "score": score, "analysis": format!("{} analysis", c.name)}))
                .collect();
            categories.insert(
                category.key().to_string(),
                json!({"score": score as u16 * 6, "criteria": criteria}),
            );
        }
        json!({
            "categories": categories,
            "recommendations": [
                {"category": "Green", "priority": "High", "suggestion": "Add photovoltaics"},
                {"category": "Purple", "priority": "High", "suggestion": "ignored"}
            ],
            "insights": ["Strong density", 42]
        })
    }

    fn synthesizer(provider: MockAIProvider) -> LlmScoreSynthesizer {
        LlmScoreSynthesizer::new(Arc::new(provider), SynthesisSettings::default())
    }

    fn request() -> SynthesisRequest {
        SynthesisRequest {
            name: "Bosco Verticale".to_string(),
            description: Some("Vertical forest towers".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn extract_json_strips_code_fences() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn extract_json_takes_first_to_last_brace() {
        let raw = "Here you go: {\"a\": {\"b\": 2}} hope that helps";
        assert_eq!(extract_json(raw), Some("{\"a\": {\"b\": 2}}"));
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn parses_valid_payload() {
        let synth = synthesizer(MockAIProvider::new());
        let analysis = synth.parse_payload(&valid_payload(15).to_string()).unwrap();
        assert_eq!(analysis.categories.green.score().value(), 90);
        assert_eq!(analysis.categories.architectural.criteria()[2].name, "New Forms of Living");
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.insights, vec!["Strong density".to_string()]);
    }

    #[test]
    fn category_total_is_recomputed_from_criteria() {
        let mut payload = valid_payload(10);
        payload["categories"]["urban"]["score"] = json!(119);
        let synth = synthesizer(MockAIProvider::new());
        let analysis = synth.parse_payload(&payload.to_string()).unwrap();
        assert_eq!(analysis.categories.urban.score().value(), 60);
    }

    #[test]
    fn criteria_are_reordered_to_catalog_order() {
        let mut payload = valid_payload(10);
        let criteria = payload["categories"]["green"]["criteria"].as_array_mut().unwrap();
        criteria.reverse();
        criteria[0]["name"] = json!("special solutions");
        let synth = synthesizer(MockAIProvider::new());
        let analysis = synth.parse_payload(&payload.to_string()).unwrap();
        assert_eq!(analysis.categories.green.criteria()[0].name, "Daylight");
        assert_eq!(analysis.categories.green.criteria()[5].name, "Special Solutions");
    }

    #[test]
    fn rejects_out_of_range_score() {
        let mut payload = valid_payload(10);
        payload["categories"]["green"]["criteria"][0]["score"] = json!(25);
        let synth = synthesizer(MockAIProvider::new());
        assert!(matches!(
            synth.parse_payload(&payload.to_string()),
            Err(SynthesisError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_score() {
        let mut payload = valid_payload(10);
        payload["categories"]["urban"]["criteria"][1]["score"] = json!("great");
        let synth = synthesizer(MockAIProvider::new());
        assert!(synth.parse_payload(&payload.to_string()).is_err());
    }

    #[test]
    fn rejects_wrong_criteria_count() {
        let mut payload = valid_payload(10);
        payload["categories"]["architectural"]["criteria"]
            .as_array_mut()
            .unwrap()
            .pop();
        let synth = synthesizer(MockAIProvider::new());
        assert!(synth.parse_payload(&payload.to_string()).is_err());
    }

    #[test]
    fn rejects_missing_or_extra_category() {
        let synth = synthesizer(MockAIProvider::new());

        let mut missing = valid_payload(10);
        missing["categories"].as_object_mut().unwrap().remove("green");
        assert!(synth.parse_payload(&missing.to_string()).is_err());

        let mut extra = valid_payload(10);
        extra["categories"]["blue"] = json!({"criteria": []});
        assert!(synth.parse_payload(&extra.to_string()).is_err());
    }

    #[test]
    fn rejects_unknown_and_duplicate_names() {
        let synth = synthesizer(MockAIProvider::new());

        let mut unknown = valid_payload(10);
        unknown["categories"]["urban"]["criteria"][0]["name"] = json!("Parking");
        assert!(synth.parse_payload(&unknown.to_string()).is_err());

        let mut duplicate = valid_payload(10);
        duplicate["categories"]["urban"]["criteria"][1]["name"] = json!("Open Spaces");
        assert!(synth.parse_payload(&duplicate.to_string()).is_err());
    }

    #[test]
    fn prompt_lists_every_criterion_and_metric() {
        let synth = synthesizer(MockAIProvider::new());
        let prompt = synth.create_analysis_prompt(&request());
        for criterion in CriteriaCatalog::aug().criteria() {
            assert!(prompt.contains(criterion.name), "missing {}", criterion.name);
        }
        assert!(prompt.contains("Name: Bosco Verticale"));
        assert!(prompt.contains("Location: Unknown"));
        assert!(prompt.contains("Plot Area: Not specified"));
    }

    #[tokio::test]
    async fn synthesize_uses_configured_sampling() {
        let provider = MockAIProvider::new().with_response(format!("```json\n{}\n```", valid_payload(12)));
        let synth = synthesizer(provider.clone());

        let analysis = synth.synthesize(&request()).await.unwrap();
        assert_eq!(analysis.categories.architectural.score().value(), 72);

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.3));
        assert_eq!(calls[0].max_tokens, Some(3000));
        assert_eq!(calls[0].system_prompt.as_deref(), Some(SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn synthesize_reports_provider_errors() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let err = synthesizer(provider).synthesize(&request()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Provider(_)));
    }

    #[tokio::test]
    async fn synthesize_reports_malformed_reply() {
        let provider = MockAIProvider::new().with_response("I cannot score this project.");
        let err = synthesizer(provider).synthesize(&request()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Malformed(_)));
    }

    #[tokio::test]
    async fn unavailable_synthesizer_always_fails() {
        let err = UnavailableSynthesizer.synthesize(&request()).await.unwrap_err();
        assert!(matches!(err, SynthesisError::Unavailable(_)));
    }
}
