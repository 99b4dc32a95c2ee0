use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};
use std::fs;

const LLMS: [&str; 4] = [
    "gemini-2.0-flash",
    "gpt-4o-mini",
    "claude-3-5-sonnet",
    "qwen3-4b",
];
const NODE_TYPES: [&str; 4] = ["override_agent", "start", "end", "phone_number"];
const LABELS: [&str; 8] = [
    "Greeting",
    "Billing",
    "Support",
    "Scheduling",
    "Escalation",
    "Feedback",
    "Goodbye",
    "Verification",
];
const TOOL_TYPES: [&str; 3] = ["webhook", "client", "system"];
const TOPICS: [&str; 5] = [
    "asks about invoices",
    "wants to book a meeting",
    "is frustrated",
    "requests a human",
    "confirms their identity",
];

/// A CLI tool to generate synthetic agent configuration payloads
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_agent.json")]
    output: String,

    /// Number of workflow nodes
    #[arg(long, default_value_t = 8)]
    nodes: usize,

    /// Number of workflow edges
    #[arg(long, default_value_t = 12)]
    edges: usize,

    /// Number of root tools
    #[arg(long, default_value_t = 4)]
    tools: usize,

    /// Seed for reproducible payloads
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if cli.edges > 0 && cli.nodes == 0 {
        eprintln!("Error: --edges ({}) requires at least one node", cli.edges);
        std::process::exit(1);
    }

    println!(
        "Generating agent payload ({} nodes, {} edges, {} tools)...",
        cli.nodes, cli.edges, cli.tools
    );

    let tools = generate_tools(&mut rng, cli.tools);
    let tool_ids: Vec<String> = tools
        .iter()
        .filter_map(|tool| tool["tool_id"].as_str().map(str::to_string))
        .collect();
    let node_ids: Vec<String> = (1..=cli.nodes).map(|n| format!("node_{}", n)).collect();

    let payload = json!({
        "agent_id": format!("agent_{}", rng.random_range(1000..10000)),
        "conversation_config": {
            "agent": {
                "first_message": "Hi! How can I help you today?",
                "language": "en",
                "disable_first_message_interruptions": rng.random_bool(0.5),
                "prompt": {
                    "prompt": "You are a helpful voice assistant.",
                    "llm": pick(&mut rng, &LLMS),
                    "temperature": rng.random_range(0.0..1.0),
                    "max_tokens": -1,
                    "tool_ids": tool_ids,
                    "tools": tools,
                }
            },
            "tts": { "model_id": "eleven_flash_v2", "voice_id": "voice_1" },
            "turn": { "turn_timeout": 7 }
        },
        "workflow": {
            "nodes": generate_nodes(&mut rng, &node_ids, &tool_ids),
            "edges": generate_edges(&mut rng, &node_ids, cli.edges),
        }
    });

    let json_output = serde_json::to_string_pretty(&payload)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved payload to '{}'", cli.output);

    Ok(())
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

fn generate_tools(rng: &mut StdRng, count: usize) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            json!({
                "tool_id": format!("tool_{}", n),
                "name": format!("tool_{}_{}", pick(rng, &TOOL_TYPES), n),
                "type": pick(rng, &TOOL_TYPES),
                "description": "Generated tool",
                "params": { "url": format!("https://example.invalid/tools/{}", n) },
            })
        })
        .collect()
}

fn generate_nodes(rng: &mut StdRng, node_ids: &[String], tool_ids: &[String]) -> Value {
    let mut nodes = Map::new();
    for (position, id) in node_ids.iter().enumerate() {
        let label = match LABELS.get(position) {
            Some(label) => label.to_string(),
            None => format!("{} {}", pick(rng, &LABELS), position + 1),
        };
        let mut node = json!({
            "label": label,
            "type": pick(rng, &NODE_TYPES),
        });

        if rng.random_bool(0.6) {
            node["additional_prompt"] = json!(format!("Focus on the {} flow.", label));
        }
        if !tool_ids.is_empty() && rng.random_bool(0.5) {
            let chosen: Vec<&String> = tool_ids.choose_multiple(rng, 2).collect();
            node["additional_tool_ids"] = json!(chosen);
        }
        if !tool_ids.is_empty() && rng.random_bool(0.3) {
            // Node-local references, one of which the root never declares.
            node["tools"] = json!([
                { "tool_id": pick_owned(rng, tool_ids) },
                format!("node_local_{}", position + 1),
            ]);
        }
        if rng.random_bool(0.4) {
            node["conversation_config"] = json!({
                "agent": { "prompt": { "llm": pick(rng, &LLMS) } }
            });
        }
        nodes.insert(id.clone(), node);
    }
    Value::Object(nodes)
}

fn pick_owned(rng: &mut StdRng, values: &[String]) -> String {
    values.choose(rng).cloned().unwrap_or_default()
}

fn generate_edges(rng: &mut StdRng, node_ids: &[String], count: usize) -> Value {
    let mut edges = Map::new();
    for n in 1..=count {
        let source = pick_owned(rng, node_ids);
        // Occasionally point at a node that does not exist.
        let target = if rng.random_bool(0.05) {
            format!("missing_{}", n)
        } else {
            pick_owned(rng, node_ids)
        };

        let mut edge = json!({
            "source": source,
            "target": target,
            "forward_condition": generate_condition(rng),
        });
        if rng.random_bool(0.3) {
            edge["backward_condition"] = generate_condition(rng);
        }
        edges.insert(format!("edge_{}", n), edge);
    }
    Value::Object(edges)
}

fn generate_condition(rng: &mut StdRng) -> Value {
    match rng.random_range(0..5) {
        0 => json!({ "type": "llm", "condition": pick(rng, &TOPICS) }),
        1 => json!({ "type": "unconditional" }),
        2 => json!({ "type": "result", "successful": rng.random_bool(0.5) }),
        3 => json!({
            "type": "expression",
            "expression": { "op": "eq", "left": "intent", "right": "billing" }
        }),
        _ => json!(pick(rng, &TOPICS)),
    }
}
