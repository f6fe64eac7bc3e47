use crate::error::Error;
use crate::game::role::{deal, DetectivePolicy, RoleCounts, RoleSet, Variant};
use crate::input::{parse_player_count, Roster};
use crate::labels::{LabelTable, Language};
use crate::output::{console_line, files_written_line, Flow, RoleFileWriter};
use crate::types::{PlayerName, Seat};
use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// What to do when a player's file cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Ask whether to go on with the remaining players.
    #[default]
    Ask,
    Skip,
    Abort,
}

#[derive(Parser, Debug)]
#[command(name = "mafia-dealer", version, about = "Deal secret Mafia roles, one file per player")]
pub struct Args {
    /// Number of players. Prompted for when missing.
    #[arg(short = 'n', long)]
    pub players: Option<usize>,

    /// Player name, repeat once per player. Skips the interactive prompts.
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Role set. Picked from a menu in interactive mode when missing.
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    #[arg(long, value_enum, default_value_t = DetectivePolicy::Single)]
    pub detectives: DetectivePolicy,

    #[arg(long)]
    pub no_doctor: bool,

    #[arg(long, value_enum, default_value_t = Language::Ru)]
    pub lang: Language,

    /// JSON label table replacing the built-in one.
    #[arg(long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    #[arg(short, long, default_value = "roles")]
    pub out_dir: PathBuf,

    #[arg(long, default_value = "txt")]
    pub ext: String,

    /// Add the role description to each player's file.
    #[arg(long)]
    pub describe: bool,

    #[arg(long)]
    pub no_files: bool,

    /// Print the assignment as JSON instead of one line per player.
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = FailurePolicy::Ask)]
    pub on_write_error: FailurePolicy,

    /// Fixed RNG seed, for rehearsing a deal. Fresh entropy otherwise.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn is_interactive(&self) -> bool {
        self.names.is_empty()
    }

    pub fn role_set(&self, variant: Variant) -> RoleSet {
        let set = RoleSet::from(variant).detectives(self.detectives);
        if self.no_doctor {
            set.without_doctor()
        } else {
            set
        }
    }

    pub fn label_table(&self) -> anyhow::Result<LabelTable> {
        match &self.labels {
            Some(path) => LabelTable::from_path(path)
                .with_context(|| format!("loading labels from {}", path.display())),
            None => Ok(LabelTable::builtin(self.lang)),
        }
    }

    /// Names given on the command line, validated.
    pub fn headless_players(&self) -> Result<Vec<PlayerName>, Error> {
        let roster = Roster::from_names(&self.names)?;
        if let Some(players) = self.players {
            if players != roster.len() {
                return Err(Error::PlayerCountMismatch {
                    players,
                    names: roster.len(),
                });
            }
        }
        Ok(roster.into_names())
    }
}

fn variant_label(variant: Variant, labels: &LabelTable) -> &str {
    match variant {
        Variant::Classic => labels.ui.variant_classic.as_str(),
        Variant::Don => labels.ui.variant_don.as_str(),
        Variant::Extended => labels.ui.variant_extended.as_str(),
    }
}

fn prompt_variant(labels: &LabelTable) -> anyhow::Result<Variant> {
    let items = Variant::ALL.map(|v| variant_label(v, labels));
    let picked = Select::new()
        .with_prompt(&labels.ui.prompt_variant)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Variant::ALL[picked])
}

fn prompt_player_count(set: &RoleSet, labels: &LabelTable) -> anyhow::Result<usize> {
    let raw: String = Input::new()
        .with_prompt(&labels.ui.prompt_player_count)
        .validate_with(|s: &String| -> Result<(), String> {
            let count = parse_player_count(s).map_err(|e| e.to_string())?;
            RoleCounts::for_players(count, set)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(parse_player_count(&raw)?)
}

fn prompt_players(count: usize, labels: &LabelTable) -> anyhow::Result<Vec<PlayerName>> {
    let mut roster = Roster::with_capacity(count);
    for i in 1..=count {
        let name: String = Input::new()
            .with_prompt(format!("{} {i}", labels.ui.prompt_player_name))
            .validate_with(|s: &String| -> Result<(), String> {
                roster.check(s).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;
        roster.push(&name)?;
    }
    Ok(roster.into_names())
}

fn on_write_failure(policy: FailurePolicy, seat: &Seat, labels: &LabelTable) -> Flow {
    match policy {
        FailurePolicy::Skip => Flow::Continue,
        FailurePolicy::Abort => Flow::Stop,
        FailurePolicy::Ask => {
            let answer = Confirm::new()
                .with_prompt(format!("{} ({})", labels.ui.confirm_continue, seat.player))
                .default(false)
                .interact();
            match answer {
                Ok(true) => Flow::Continue,
                Ok(false) => Flow::Stop,
                Err(e) => {
                    log::warn!("confirmation prompt failed: {e}");
                    Flow::Stop
                }
            }
        }
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let labels = args.label_table()?;
    let variant = match args.variant {
        Some(variant) => variant,
        None if args.is_interactive() => prompt_variant(&labels)?,
        None => Variant::default(),
    };
    let set = args.role_set(variant);

    let players = if args.is_interactive() {
        let count = match args.players {
            Some(count) => {
                RoleCounts::for_players(count, &set)?;
                count
            }
            None => prompt_player_count(&set, &labels)?,
        };
        prompt_players(count, &labels)?
    } else {
        args.headless_players()?
    };

    let mut rng = match args.seed {
        Some(seed) => {
            log::warn!("dealing with fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let assignment = deal(&players, &set, &mut rng)?;

    if args.json {
        println!("{}", assignment.to_json()?);
    } else {
        for seat in &assignment {
            println!("{}", console_line(seat, &labels));
        }
    }

    if args.no_files {
        return Ok(());
    }

    let writer = RoleFileWriter::new(&args.out_dir)
        .extension(args.ext.as_str())
        .describe(args.describe);
    let summary = writer.write_all(&assignment, &labels, |seat, _| {
        on_write_failure(args.on_write_error, seat, &labels)
    })?;
    log::info!(
        "{} of {} files written to {}",
        summary.written.len(),
        assignment.len(),
        writer.dir().display()
    );

    if summary.stopped {
        bail!(
            "stopped after {} of {} files",
            summary.written.len(),
            assignment.len()
        );
    }
    if !summary.failed.is_empty() {
        let who: Vec<_> = summary.failed.iter().map(|(p, _)| p.as_str()).collect();
        bail!("no file written for: {}", who.join(", "));
    }
    println!("{}", files_written_line(&labels, writer.dir()));
    Ok(())
}

#[cfg(test)]
mod args_tests {
    use super::*;
    use crate::error::NameError;

    fn parse(argv: &[&str]) -> Args {
        let argv = std::iter::once("mafia-dealer").chain(argv.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.variant, None);
        assert!(args.is_interactive());
        assert_eq!(args.role_set(Variant::default()), RoleSet::classic());
        assert_eq!(args.lang, Language::Ru);
        assert_eq!(args.out_dir, PathBuf::from("roles"));
        assert_eq!(args.ext, "txt");
        assert_eq!(args.on_write_error, FailurePolicy::Ask);
        assert!(args.names.is_empty());
        assert!(args.seed.is_none());
    }

    #[test]
    fn role_set_flags_combine() {
        let args = parse(&[
            "--variant",
            "don",
            "--detectives",
            "per-six",
            "--no-doctor",
        ]);
        assert_eq!(args.variant, Some(Variant::Don));
        assert_eq!(
            args.role_set(Variant::Don),
            RoleSet::with_don()
                .detectives(DetectivePolicy::PerSix)
                .without_doctor()
        );
    }

    #[test]
    fn headless_names_are_validated() {
        let args = parse(&["--name", "Anna", "--name", "anna"]);
        assert!(matches!(
            args.headless_players(),
            Err(Error::InvalidName(NameError::Duplicate(_)))
        ));
    }

    #[test]
    fn headless_count_must_match_names() {
        let args = parse(&[
            "-n", "5", "--name", "A", "--name", "B", "--name", "C", "--name", "D",
        ]);
        assert!(matches!(
            args.headless_players(),
            Err(Error::PlayerCountMismatch { players: 5, names: 4 })
        ));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let argv = ["mafia-dealer", "--variant", "werewolf"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn variant_menu_lists_every_variant_in_order() {
        let ru = LabelTable::builtin(Language::Ru);
        let items = Variant::ALL.map(|v| variant_label(v, &ru));
        assert_eq!(
            items,
            ["Классический", "С Доном", "Расширенный (с Маньяком)"]
        );
    }

    #[test]
    fn names_on_command_line_skip_prompts() {
        let args = parse(&["--name", "Anna"]);
        assert!(!args.is_interactive());
    }

    #[test]
    fn non_interactive_failure_policies() {
        let en = LabelTable::builtin(Language::En);
        let seat = Seat {
            player: "Bo".into(),
            role: crate::types::Role::Mafia,
        };
        assert_eq!(on_write_failure(FailurePolicy::Skip, &seat, &en), Flow::Continue);
        assert_eq!(on_write_failure(FailurePolicy::Abort, &seat, &en), Flow::Stop);
    }
}
