use std::fmt;

const RACE_CARD_TEMPLATE: &str = "# {timestamp}

Start your response with your model name then analyze the following race.

## Race Information
Date: {race_date}
Track: {track}
Race Number: {race_number}

## Speed Data
{speed_data}

## Class Data
{class_data}

## Pace Data
{pace_data}

## User Insights
{user_insights}
";

const POOLS_TEMPLATE: &str = "# {timestamp}

Start your response with your model name then analyze the following pools data for handicapping the race.

## Race Information
Date: {race_date}
Track: {track}
Race Number: {race_number}

## Pools Data
{pools_data}
";

const SITE_SUMMARY_TEMPLATE: &str = "You are an expert horse racing analyst.

Start your response with your model name then
Analyze the following horse racing data and provide:
- Key insights from each section
- Top horse picks with reasoning
- Predicted winner(s) and placers
- Value bets or risks
- Any other relevant advice

Structure your response clearly.

## Race Information
{race_info}

## Summary Data
{summary_data}

## Pace Data
{pace_data}
";

/// Which analysis form a template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    RaceCard,
    Pools,
    SiteSummary,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::RaceCard => "race_card",
            PromptKind::Pools => "pools",
            PromptKind::SiteSummary => "site_summary",
        }
    }

    pub fn builtin_template(&self) -> PromptTemplate {
        let source = match self {
            PromptKind::RaceCard => RACE_CARD_TEMPLATE,
            PromptKind::Pools => POOLS_TEMPLATE,
            PromptKind::SiteSummary => SITE_SUMMARY_TEMPLATE,
        };
        PromptTemplate::new(source)
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt text with `{name}` placeholders. `{{` and `}}` render as literal
/// braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder: {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let source = self.0.as_str();
        let mut out = String::with_capacity(source.len());
        let mut chars = source.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '{' => {
                    if chars.next_if(|&(_, c)| c == '{').is_some() {
                        out.push('{');
                        continue;
                    }
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(TemplateError::UnbalancedBrace(idx)),
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::UnbalancedBrace(idx));
                    }
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;
                    out.push_str(value);
                }
                '}' => {
                    if chars.next_if(|&(_, c)| c == '}').is_none() {
                        return Err(TemplateError::UnbalancedBrace(idx));
                    }
                    out.push('}');
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}
