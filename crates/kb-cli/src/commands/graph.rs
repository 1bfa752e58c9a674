use comfy_table::{ContentArrangement, Table};
use kb_fiction::content;
use kb_fiction::graph::{ChoiceSummary, GraphSummary};

/// Print every node and its choices as tables.
pub fn run_text() -> Result<(), String> {
    let summary = content::story().summary();

    println!("  Story graph rooted at '{}'", summary.root);
    println!();

    for node in &summary.nodes {
        let visits = node.visits.map(|v| format!(" (visits {v})")).unwrap_or_default();
        println!("  [{}] {}{visits}", node.id, node.title);

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Choice", "Shown when", "Branch", "Effects", "Then"]);
        for (i, choice) in node.choices.iter().enumerate() {
            add_choice_rows(&mut table, i + 1, choice);
        }
        println!("{table}");
        println!();
    }

    print_totals(&summary);
    Ok(())
}

fn add_choice_rows(table: &mut Table, number: usize, choice: &ChoiceSummary) {
    let label = if choice.back {
        format!("{} (back)", choice.label)
    } else {
        choice.label.clone()
    };
    for (i, branch) in choice.branches.iter().enumerate() {
        let (number, label, shown) = if i == 0 {
            (number.to_string(), label.clone(), choice.condition.clone())
        } else {
            (String::new(), String::new(), String::new())
        };
        let effects = if branch.effects.is_empty() {
            "-".to_string()
        } else {
            branch.effects.join(", ")
        };
        table.add_row(vec![
            number,
            label,
            shown,
            branch.condition.clone(),
            effects,
            branch.transition.clone(),
        ]);
    }
}

fn print_totals(summary: &GraphSummary) {
    let choices: usize = summary.nodes.iter().map(|n| n.choices.len()).sum();
    println!(
        "  {} nodes, {} choices, {} encounters",
        summary.nodes.len(),
        choices,
        summary.encounters.len()
    );
    for encounter in &summary.encounters {
        println!(
            "  encounter '{}': {} ({} HP)",
            encounter.id, encounter.foe, encounter.health
        );
    }
}

/// Print the graph summary as pretty JSON.
pub fn run_json() -> Result<(), String> {
    let summary = content::story().summary();
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("failed to serialize graph: {e}"))?;
    println!("{json}");
    Ok(())
}
