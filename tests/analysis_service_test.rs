mod helpers;

use std::sync::Arc;

use helpers::{MockLlmClient, StaticCatalog};
use race_handicapper::application::ports::LlmClientError;
use race_handicapper::application::services::{AnalysisError, AnalysisService};
use race_handicapper::domain::{
    ModelOption, PoolsCard, PromptTemplate, RaceCard, RaceHeader, SiteSummary,
};

fn service_with(
    llm: Arc<MockLlmClient>,
    catalog: StaticCatalog,
) -> AnalysisService<MockLlmClient> {
    AnalysisService::new(llm, Arc::new(catalog), 0.7, 4000)
}

fn saratoga_header() -> RaceHeader {
    RaceHeader::new(
        Some("2024-08-03".to_string()),
        "saratoga".to_string(),
        Some("5".to_string()),
    )
}

#[tokio::test]
async fn given_race_card_when_analyzing_then_markdown_starts_with_timestamp_heading() {
    let llm = Arc::new(MockLlmClient::replying("Pick the 4."));
    let service = service_with(Arc::clone(&llm), StaticCatalog::default());
    let card = RaceCard {
        header: saratoga_header(),
        speed_data: "1 Alpha 98".to_string(),
        class_data: String::new(),
        pace_data: String::new(),
        user_insights: String::new(),
    };

    let analysis = service.analyze_race_card(&card, None).await.unwrap();

    assert_eq!(
        analysis.markdown,
        "# 2024-08-03 • SARATOGA • Race 5\n\nPick the 4."
    );
    assert_eq!(analysis.model, ModelOption::builtin()[0].model_id);

    let requests = llm.recorded();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("1 Alpha 98"));
    assert_eq!(requests[0].temperature, Some(0.7));
    assert_eq!(requests[0].max_tokens, Some(4000));
}

#[tokio::test]
async fn given_empty_race_card_when_analyzing_then_llm_is_not_called() {
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let service = service_with(Arc::clone(&llm), StaticCatalog::default());
    let card = RaceCard {
        header: RaceHeader::new(None, String::new(), None),
        speed_data: String::new(),
        class_data: String::new(),
        pace_data: String::new(),
        user_insights: String::new(),
    };

    let result = service.analyze_race_card(&card, None).await;

    assert!(matches!(result, Err(AnalysisError::MissingData)));
    assert!(llm.recorded().is_empty());
}

#[tokio::test]
async fn given_custom_template_when_analyzing_pools_then_values_are_substituted() {
    let llm = Arc::new(MockLlmClient::replying("Value in the exacta."));
    let catalog = StaticCatalog {
        template: Some(PromptTemplate::new("{track} R{race_number}: {pools_data} {{raw}}")),
        ..StaticCatalog::default()
    };
    let service = service_with(Arc::clone(&llm), catalog);
    let card = PoolsCard {
        header: saratoga_header(),
        pools_data: "WIN 12000".to_string(),
    };

    let analysis = service
        .analyze_pools(&card, Some("anthropic/claude-3.5-sonnet".to_string()))
        .await
        .unwrap();

    assert_eq!(analysis.model, "anthropic/claude-3.5-sonnet");
    assert_eq!(llm.recorded()[0].prompt, "saratoga R5: WIN 12000 {raw}");
}

#[tokio::test]
async fn given_template_with_unknown_placeholder_when_analyzing_then_returns_template_error() {
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let catalog = StaticCatalog {
        template: Some(PromptTemplate::new("{mystery}")),
        ..StaticCatalog::default()
    };
    let service = service_with(Arc::clone(&llm), catalog);
    let card = PoolsCard {
        header: saratoga_header(),
        pools_data: "WIN 12000".to_string(),
    };

    let result = service.analyze_pools(&card, None).await;

    assert!(matches!(result, Err(AnalysisError::Template { .. })));
    assert!(llm.recorded().is_empty());
}

#[tokio::test]
async fn given_site_summary_when_analyzing_then_reply_is_returned_as_is() {
    let llm = Arc::new(MockLlmClient::replying("## Summary\nFast track."));
    let service = service_with(Arc::clone(&llm), StaticCatalog::default());
    let summary = SiteSummary {
        race_info: "Race 3, 6f".to_string(),
        summary_data: String::new(),
        pace_data: String::new(),
    };

    let analysis = service.analyze_site_summary(&summary, None).await.unwrap();

    assert_eq!(analysis.markdown, "## Summary\nFast track.");
    assert!(llm.recorded()[0].prompt.contains("Race 3, 6f"));
}

#[tokio::test]
async fn given_instructions_when_analyzing_race_files_then_prompt_has_preamble_and_no_sampling() {
    let llm = Arc::new(MockLlmClient::replying("I am a model. Pick 2."));
    let service = service_with(Arc::clone(&llm), StaticCatalog::default());

    service
        .analyze_race_files("openai/gpt-4o", "\n\n--- Race_1.pdf ---\nAlpha", "Focus on pace")
        .await
        .unwrap();

    let request = &llm.recorded()[0];
    assert!(request
        .prompt
        .starts_with("Please identify yourself in the first line of your response."));
    assert!(request
        .prompt
        .contains("User instructions: Focus on pace\n\n\n\n--- Race_1.pdf ---\nAlpha"));
    assert_eq!(request.temperature, None);
    assert_eq!(request.max_tokens, None);
}

#[tokio::test]
async fn given_unknown_display_name_when_resolving_model_then_returns_unknown_model() {
    let service = service_with(
        Arc::new(MockLlmClient::replying("unused")),
        StaticCatalog::default(),
    );

    let known = service.model_id_for_display_name("GPT-4o").await.unwrap();
    let unknown = service.model_id_for_display_name("HAL 9000").await;

    assert_eq!(known, "openai/gpt-4o");
    assert!(matches!(unknown, Err(AnalysisError::UnknownModel(_))));
}

#[tokio::test]
async fn given_llm_failure_when_analyzing_then_error_is_propagated() {
    let llm = Arc::new(MockLlmClient::failing(|| LlmClientError::RateLimited));
    let service = service_with(llm, StaticCatalog::default());
    let summary = SiteSummary {
        race_info: "Race 3".to_string(),
        summary_data: String::new(),
        pace_data: String::new(),
    };

    let result = service.analyze_site_summary(&summary, None).await;

    assert!(matches!(
        result,
        Err(AnalysisError::Completion(LlmClientError::RateLimited))
    ));
}
