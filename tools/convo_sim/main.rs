//! Conversation Simulator - Deterministic scripted scenarios for the Roger
//! response pipeline.
//!
//! Usage:
//!   convo_sim --scenario greeting
//!   convo_sim --scenario stressor
//!   convo_sim --scenario crisis
//!   convo_sim --scenario repetition
//!   convo_sim --scenario all
//!
//! Outputs machine-readable JSON reports to ./artifacts/simulations/

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use roger_core::repetition::{detect_harmful_repetitions, fix_harmful_repetitions};
use roger_core::{ConversationLog, Message, RogerPipeline};

const SEED: u64 = 42;

// ============================================================================
// REPORT TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TurnRecord {
    input: String,
    reply: String,
    route_type: String,
    confidence: f64,
    crisis_detected: bool,
    systems_engaged: Vec<String>,
    processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioReport {
    scenario: String,
    turns: Vec<TurnRecord>,
    crisis_turns: usize,
    repetition_flagged: usize,
    success: bool,
    notes: String,
}

// ============================================================================
// SCENARIOS
// ============================================================================

fn scenario_script(name: &str) -> Option<Vec<&'static str>> {
    let script = match name {
        "greeting" => vec!["hi", "how are you?", "thanks, that helps", "bye"],
        "stressor" => vec![
            "hi",
            "My boss keeps yelling at me and I can't take it anymore",
            "and the rent and bills keep piling up too",
            "I guess it helps to say it out loud",
        ],
        "crisis" => vec![
            "hello",
            "I've been restricting my eating lately",
            "honestly I want to kill myself",
        ],
        "repetition" => vec![
            "I feel anxious. I feel anxious. I feel anxious.",
            "the the weather weather has been gray",
        ],
        _ => return None,
    };
    Some(script)
}

async fn run_scenario(name: &str) -> Result<ScenarioReport> {
    let script = scenario_script(name)
        .with_context(|| format!("unknown scenario: {}", name))?;

    let pipeline = RogerPipeline::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut log = ConversationLog::new();
    let mut turns = Vec::new();
    let mut crisis_turns = 0;
    let mut repetition_flagged = 0;

    for input in script {
        let history = log.user_texts();
        let result = pipeline.respond_with_rng(input, &history, &mut rng).await;

        if result.crisis_detected {
            crisis_turns += 1;
        }
        let report = detect_harmful_repetitions(&result.text);
        if report.has_repetition() {
            repetition_flagged += 1;
        }

        log.append(Message::user(input));
        log.append(Message::assistant(&result.text));

        turns.push(TurnRecord {
            input: input.to_string(),
            reply: result.text,
            route_type: result.route_type.to_string(),
            confidence: result.confidence,
            crisis_detected: result.crisis_detected,
            systems_engaged: result.systems_engaged,
            processing_time_ms: result.processing_time_ms,
        });
    }

    // A scenario passes when no reply leaves repetition behind and every
    // reply is non-empty.
    let success = repetition_flagged == 0 && turns.iter().all(|t| !t.reply.is_empty());

    let notes = match name {
        "crisis" => format!(
            "{} of {} turns escalated to the crisis lane",
            crisis_turns,
            turns.len()
        ),
        "repetition" => {
            // Show the guard at work on the raw inputs too
            let fixed = fix_harmful_repetitions("the the weather weather has been gray");
            format!("guard demo: {:?}", fixed)
        }
        _ => String::new(),
    };

    Ok(ScenarioReport {
        scenario: name.to_string(),
        turns,
        crisis_turns,
        repetition_flagged,
        success,
        notes,
    })
}

// ============================================================================
// MAIN
// ============================================================================

fn parse_scenario_arg() -> Result<String> {
    let args: Vec<String> = std::env::args().collect();
    let mut scenario = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                if i + 1 >= args.len() {
                    bail!("--scenario requires a value");
                }
                scenario = Some(args[i + 1].clone());
                i += 2;
            }
            other => bail!("unknown argument: {}", other),
        }
    }
    scenario.context("usage: convo_sim --scenario <greeting|stressor|crisis|repetition|all>")
}

fn write_report(report: &ScenarioReport) -> Result<PathBuf> {
    let dir = PathBuf::from("artifacts/simulations");
    fs::create_dir_all(&dir).context("creating artifacts/simulations")?;
    let path = dir.join(format!("convo_{}.json", report.scenario));
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let scenario = parse_scenario_arg()?;

    let names: Vec<&str> = if scenario == "all" {
        vec!["greeting", "stressor", "crisis", "repetition"]
    } else {
        vec![scenario.as_str()]
    };

    let mut all_ok = true;
    for name in names {
        let report = run_scenario(name).await?;
        let path = write_report(&report)?;
        println!(
            "{}: {} turns, {} crisis, {} flagged -> {} ({})",
            report.scenario,
            report.turns.len(),
            report.crisis_turns,
            report.repetition_flagged,
            if report.success { "ok" } else { "FAILED" },
            path.display()
        );
        all_ok &= report.success;
    }

    if !all_ok {
        bail!("one or more scenarios failed");
    }
    Ok(())
}
