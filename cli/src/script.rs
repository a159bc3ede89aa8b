//! Scripted call sequences and their replay against a token.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::json;
use vtk_nullables::NullClock;
use vtk_token::{
    AccountId, Amount, Clock, ProposalId, TokenConfig, TokenError, TokenEvent, VotingToken,
};
use vtk_utils::format_duration;

/// A sequence of calls, replayed in order on a clock starting at `start_time`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub start_time: u64,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One call against the token, or a clock movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Transfer {
        from: String,
        to: String,
        amount: u64,
    },
    Approve {
        owner: String,
        spender: String,
        amount: u64,
    },
    TransferFrom {
        spender: String,
        from: String,
        to: String,
        amount: u64,
    },
    Propose {
        id: u64,
    },
    Accept {
        voter: String,
        id: u64,
    },
    Reject {
        voter: String,
        id: u64,
    },
    Advance {
        secs: u64,
    },
    Info {
        id: u64,
    },
    Active,
    All,
    Balance {
        account: String,
    },
}

/// How replay results are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Totals for a finished replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub rejected: usize,
    pub events: usize,
}

impl Script {
    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing script {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

fn account(raw: &str) -> anyhow::Result<AccountId> {
    Ok(AccountId::parse(raw)?)
}

/// Replay `script` on a fresh token built from `config`.
///
/// Rejected calls are reported and the replay moves on; malformed steps
/// (e.g. an empty account name) abort it.
pub fn replay(
    config: &TokenConfig,
    script: &Script,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<ReplaySummary> {
    let mut token = VotingToken::new(config, NullClock::new(script.start_time))?;
    let mut summary = ReplaySummary::default();

    for (n, step) in script.steps.iter().enumerate() {
        summary.steps += 1;
        let outcome = run_step(&mut token, step, format, out)
            .with_context(|| format!("step {} ({step:?})", n + 1))?;
        match outcome {
            Ok(events) => summary.events += events,
            Err(error) => {
                summary.rejected += 1;
                tracing::debug!(step = n + 1, %error, "step rejected");
                match format {
                    OutputFormat::Text => writeln!(out, "  rejected: {error}")?,
                    OutputFormat::Json => writeln!(
                        out,
                        "{}",
                        json!({ "step": n + 1, "rejected": error.to_string() })
                    )?,
                }
            }
        }
    }

    tracing::info!(
        steps = summary.steps,
        rejected = summary.rejected,
        events = summary.events,
        "replay finished"
    );
    Ok(summary)
}

/// Run one step. The outer error aborts the replay; the inner one is a
/// rejected call.
fn run_step(
    token: &mut VotingToken<NullClock>,
    step: &Step,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<Result<usize, TokenError>> {
    if format == OutputFormat::Text {
        writeln!(out, "{}", describe(step))?;
    }

    let result = match step {
        Step::Transfer { from, to, amount } => {
            token.transfer(&account(from)?, &account(to)?, Amount::from(*amount))
        }
        Step::Approve {
            owner,
            spender,
            amount,
        } => token.approve(&account(owner)?, &account(spender)?, Amount::from(*amount)),
        Step::TransferFrom {
            spender,
            from,
            to,
            amount,
        } => token.transfer_from(
            &account(spender)?,
            &account(from)?,
            &account(to)?,
            Amount::from(*amount),
        ),
        Step::Propose { id } => token.propose(ProposalId::new(*id)),
        Step::Accept { voter, id } => token.accept_proposal(&account(voter)?, ProposalId::new(*id)),
        Step::Reject { voter, id } => token.reject_proposal(&account(voter)?, ProposalId::new(*id)),
        Step::Advance { secs } => {
            token.clock().advance(*secs);
            let now = token.clock().now();
            match format {
                OutputFormat::Text => writeln!(out, "  now {now}")?,
                OutputFormat::Json => writeln!(out, "{}", json!({ "now": now }))?,
            }
            Ok(Vec::new())
        }
        Step::Info { id } => {
            return match token.proposal_info(ProposalId::new(*id)) {
                Ok(info) => {
                    match format {
                        OutputFormat::Text => writeln!(
                            out,
                            "  {}: {} (against {}, for {}, created {})",
                            info.id, info.status, info.against_power, info.for_power, info.created_at
                        )?,
                        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&info)?)?,
                    }
                    Ok(Ok(0))
                }
                Err(e) => Ok(Err(e)),
            };
        }
        Step::Active => {
            write_ids(out, format, "active", &token.active_proposals())?;
            Ok(Vec::new())
        }
        Step::All => {
            write_ids(out, format, "all", &token.all_proposals())?;
            Ok(Vec::new())
        }
        Step::Balance { account: raw } => {
            let balance = token.balance_of(&account(raw)?);
            match format {
                OutputFormat::Text => writeln!(out, "  {raw}: {balance}")?,
                OutputFormat::Json => {
                    writeln!(out, "{}", json!({ "account": raw, "balance": balance }))?
                }
            }
            Ok(Vec::new())
        }
    };

    Ok(match result {
        Ok(events) => {
            write_events(out, format, &events)?;
            Ok(events.len())
        }
        Err(e) => Err(e),
    })
}

fn describe(step: &Step) -> String {
    match step {
        Step::Transfer { from, to, amount } => format!("transfer {amount} {from} -> {to}"),
        Step::Approve {
            owner,
            spender,
            amount,
        } => format!("approve {spender} to spend {amount} of {owner}"),
        Step::TransferFrom {
            spender,
            from,
            to,
            amount,
        } => format!("{spender} transfers {amount} {from} -> {to}"),
        Step::Propose { id } => format!("propose {id}"),
        Step::Accept { voter, id } => format!("{voter} accepts {id}"),
        Step::Reject { voter, id } => format!("{voter} rejects {id}"),
        Step::Advance { secs } => format!("advance {}", format_duration(*secs)),
        Step::Info { id } => format!("info {id}"),
        Step::Active => "active proposals".to_string(),
        Step::All => "all proposals".to_string(),
        Step::Balance { account } => format!("balance of {account}"),
    }
}

fn write_events(out: &mut impl Write, format: OutputFormat, events: &[TokenEvent]) -> anyhow::Result<()> {
    for event in events {
        match format {
            OutputFormat::Text => writeln!(out, "  {event}")?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(event)?)?,
        }
    }
    Ok(())
}

fn write_ids(
    out: &mut impl Write,
    format: OutputFormat,
    label: &str,
    ids: &[ProposalId],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let list: Vec<String> = ids.iter().map(ToString::to_string).collect();
            writeln!(out, "  {label}: [{}]", list.join(", "))?;
        }
        OutputFormat::Json => writeln!(out, "{}", json!({ label: ids }))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        start_time = 1000

        [[step]]
        op = "propose"
        id = 123

        [[step]]
        op = "transfer"
        from = "owner"
        to = "alice"
        amount = 66000000

        [[step]]
        op = "transfer"
        from = "alice"
        to = "bob"
        amount = 33000000

        [[step]]
        op = "accept"
        voter = "owner"
        id = 123

        [[step]]
        op = "reject"
        voter = "alice"
        id = 123

        [[step]]
        op = "transfer"
        from = "bob"
        to = "alice"
        amount = 16000000

        [[step]]
        op = "transfer"
        from = "owner"
        to = "alice"
        amount = 1000001

        [[step]]
        op = "info"
        id = 123

        [[step]]
        op = "active"
    "#;

    fn run(script: &str, format: OutputFormat) -> (ReplaySummary, String) {
        let script = Script::from_toml_str(script).unwrap();
        let mut out = Vec::new();
        let summary = replay(&TokenConfig::default(), &script, format, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_tagged_steps() {
        let script = Script::from_toml_str(SCENARIO).unwrap();
        assert_eq!(script.start_time, 1000);
        assert_eq!(script.steps.len(), 9);
        assert_eq!(script.steps[0], Step::Propose { id: 123 });
        assert_eq!(script.steps[8], Step::Active);
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        assert!(Script::from_toml_str("[[step]]\nop = \"mint\"\n").is_err());
    }

    #[test]
    fn text_replay_reports_events_and_queries() {
        let (summary, text) = run(SCENARIO, OutputFormat::Text);
        assert_eq!(summary.steps, 9);
        assert_eq!(summary.rejected, 0);
        assert!(text.contains("VotesRatioChanged(123, 33000000, 34000000)"));
        assert!(text.contains("VotesRatioChanged(123, 49000000, 34000000)"));
        assert!(text.contains("ProposalRejected(123)"));
        assert!(text.contains("123: rejected"));
        assert!(text.contains("active: []"));
    }

    #[test]
    fn json_replay_emits_one_object_per_line() {
        let (summary, text) = run(SCENARIO, OutputFormat::Json);
        for line in text.lines() {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["event"], "proposal_created");
        assert_eq!(summary.events, text.lines().count() - 2);
    }

    #[test]
    fn rejected_calls_do_not_stop_the_replay() {
        let script = r#"
            [[step]]
            op = "transfer"
            from = "nobody"
            to = "owner"
            amount = 1

            [[step]]
            op = "advance"
            secs = 259201

            [[step]]
            op = "balance"
            account = "owner"
        "#;
        let (summary, text) = run(script, OutputFormat::Text);
        assert_eq!(summary.rejected, 1);
        assert!(text.contains("rejected: ledger error"));
        assert!(text.contains("advance 3d 0h"));
        assert!(text.contains("owner: 100000000"));
    }

    #[test]
    fn malformed_account_aborts() {
        let script = Script {
            start_time: 0,
            steps: vec![Step::Balance {
                account: String::new(),
            }],
        };
        let mut out = Vec::new();
        assert!(replay(&TokenConfig::default(), &script, OutputFormat::Text, &mut out).is_err());
    }

    #[test]
    fn loads_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, SCENARIO).unwrap();
        assert_eq!(Script::from_toml_file(&path).unwrap().steps.len(), 9);
        assert!(Script::from_toml_file(dir.path().join("missing.toml")).is_err());
    }
}
