//! Console output formatter for debate results

use colored::Colorize;
use debate_domain::{AgentUsage, CostBreakdown, DebateResult, OutputFormat, UsageRecord};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `result` in the requested format.
    pub fn render(result: &DebateResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Verdict => Self::format_verdict_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete debate
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Debate Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Topic:".cyan().bold(), result.topic));

        output.push_str(&Self::section_header("Sides"));
        output.push_str(&format!(
            "\n{}\n{}\n",
            "── Debater #1 ──".yellow().bold(),
            result.sides.debater_1.trim()
        ));
        output.push_str(&format!(
            "\n{}\n{}\n",
            "── Debater #2 ──".yellow().bold(),
            result.sides.debater_2.trim()
        ));

        output.push_str(&Self::section_header("Agenda"));
        if result.agenda.is_empty() {
            output.push_str(&format!("{}\n", "(no talking points)".dimmed()));
        }
        for (i, point) in result.agenda.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, point));
        }

        for (i, outcome) in result.topics.iter().enumerate() {
            output.push_str(&Self::section_header(&format!(
                "Talking Point #{}: {}",
                i + 1,
                outcome.talking_point
            )));
            output.push_str(&format!("\n{}\n", outcome.transcript.trim()));
            output.push_str(&format!(
                "\n{}\n{}\n",
                "── Moderator ──".yellow().bold(),
                outcome.evaluation.trim()
            ));
        }

        output.push_str(&Self::section_header("Final Verdict"));
        output.push_str(&format!("\n{}\n", result.final_verdict.trim()));

        output.push_str(&Self::section_header("Usage"));
        output.push_str(&Self::format_usage(&result.agents, result.totals, result.cost));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the verdict only (concise output)
    pub fn format_verdict_only(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Debate Verdict ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), result.topic));
        output.push_str(result.final_verdict.trim());
        output.push_str("\n\n");
        output.push_str(&format!(
            "{}\n",
            format!(
                "{} tokens, ${:.4}",
                result.totals.total_tokens, result.cost.total_cost
            )
            .dimmed()
        ));

        output
    }

    /// Per-agent token and cost table, followed by the totals.
    pub fn format_usage(agents: &[AgentUsage], totals: UsageRecord, cost: CostBreakdown) -> String {
        let mut output = format!(
            "{:<12} {:>6} {:>10} {:>11} {:>10}\n",
            "Agent", "Calls", "Prompt", "Completion", "Cost ($)"
        );
        for agent in agents {
            output.push_str(&format!(
                "{:<12} {:>6} {:>10} {:>11} {:>10.4}\n",
                agent.role.display_name(),
                agent.calls,
                agent.totals.prompt_tokens,
                agent.totals.completion_tokens,
                agent.cost.total_cost
            ));
        }
        output.push_str(&format!(
            "{:<12} {:>6} {:>10} {:>11} {:>10.4}\n",
            "Total",
            agents.iter().map(|a| a.calls).sum::<usize>(),
            totals.prompt_tokens,
            totals.completion_tokens,
            cost.total_cost
        ));
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        Agenda, AgentRole, CostRates, Model, SideAssignments, TalkingPoint, TopicOutcome,
    };

    fn sample() -> DebateResult {
        let agents = AgentRole::ALL
            .iter()
            .map(|role| {
                let totals = UsageRecord::new(1000, 100);
                AgentUsage {
                    role: *role,
                    model: Model::default(),
                    calls: 2,
                    totals,
                    cost: CostRates::default().cost_of(&totals),
                }
            })
            .collect();
        DebateResult::new(
            "Tabs vs spaces",
            1,
            1,
            SideAssignments {
                debater_1: "Tabs".to_string(),
                debater_2: "Spaces".to_string(),
            },
            &Agenda::parse("Readability", ";"),
            vec![TopicOutcome::new(
                TalkingPoint::new("Readability"),
                "Winner: Debater #2",
                "Debater #1: tabs\nDebater #2: spaces",
            )],
            "Champion: Debater #2",
            agents,
        )
    }

    #[test]
    fn test_full_contains_every_section() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::render(&sample(), OutputFormat::Full);
        for expected in [
            "Tabs vs spaces",
            "Readability",
            "Winner: Debater #2",
            "Champion: Debater #2",
            "Debater #1: tabs",
            "Total",
        ] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_verdict_only_is_concise() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::render(&sample(), OutputFormat::Verdict);
        assert!(text.contains("Champion: Debater #2"));
        assert!(!text.contains("Debater #1: tabs"));
        assert!(text.contains("4400 tokens"));
    }

    #[test]
    fn test_json_is_parseable() {
        let text = ConsoleFormatter::render(&sample(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["topic"], "Tabs vs spaces");
        assert_eq!(value["agents"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_usage_table_sums_calls() {
        let result = sample();
        let table = ConsoleFormatter::format_usage(&result.agents, result.totals, result.cost);
        let total_line = table.lines().last().unwrap();
        assert!(total_line.starts_with("Total"));
        assert!(total_line.contains(" 8 "));
        assert!(total_line.contains("4000"));
    }
}
