use std::collections::HashMap;
use std::time::Duration;

use bhabhi::domain::game_transition::GameEvent;
use bhabhi::domain::rules::TochooTiming;
use bhabhi::domain::snapshot::GameSnapshot;
use bhabhi::domain::state::{Phase, SeatKind};
use bhabhi::domain::tricks::Outcome;
use bhabhi::domain::Card;
use bhabhi::{
    GameError, GameFlowService, Intent, Presentation, ScheduleRequest, SetupConfig, Table,
    TableConfig,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;

mod telemetry;

#[derive(Parser, Debug)]
#[command(name = "bhabhi", about = "Bhabhi (Thulla) at the terminal")]
struct Args {
    /// Seat layout, one letter per seat: H human, C CPU, R random CPU
    #[arg(long, default_value = "HCCC")]
    seats: String,

    /// Game seed (overrides BHABHI_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// CPU auto-play delay in ms (overrides BHABHI_CPU_DELAY_MS)
    #[arg(long)]
    cpu_delay_ms: Option<u64>,

    /// Resolved-trick display time in ms (overrides BHABHI_TRICK_DISPLAY_MS)
    #[arg(long)]
    trick_display_ms: Option<u64>,

    /// immediate | end_of_round (overrides BHABHI_TOCHOO_TIMING)
    #[arg(long)]
    tochoo_timing: Option<TochooTiming>,
}

/// Everything that reaches the intent queue.
#[derive(Debug)]
enum Input {
    Command(Command),
    Timer(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Card),
    Start,
    Pause,
    Resume,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, GameError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "start" | "s" => Ok(Command::Start),
        "pause" | "p" => Ok(Command::Pause),
        "resume" | "r" => Ok(Command::Resume),
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        token => token.parse::<Card>().map(Command::Play),
    }
}

const HELP: &str = "commands: <card> (e.g. AS, TC, 10h, 7d) | pause | resume | reset | start | quit";

/// Text rendering plus tokio timers that post back into the intent queue.
struct TerminalPresentation {
    tx: UnboundedSender<Input>,
    timers: HashMap<u64, JoinHandle<()>>,
}

impl TerminalPresentation {
    fn new(tx: UnboundedSender<Input>) -> Self {
        Self {
            tx,
            timers: HashMap::new(),
        }
    }
}

impl Presentation for TerminalPresentation {
    fn render(&mut self, snapshot: &GameSnapshot) {
        println!("{}", render_snapshot(snapshot));
    }

    fn schedule(&mut self, request: ScheduleRequest) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(request.delay_ms)).await;
            let _ = tx.send(Input::Timer(request.ticket));
        });
        self.timers.retain(|_, h| !h.is_finished());
        self.timers.insert(request.ticket, handle);
    }

    fn cancel(&mut self, ticket: u64) {
        if let Some(handle) = self.timers.remove(&ticket) {
            handle.abort();
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { leader } => {
                println!("* new game: seat {leader} holds A♠ and leads");
            }
            GameEvent::CardPlayed {
                seat,
                card,
                tochoo: true,
            } => println!("* seat {seat} cannot follow: tochoo with {}!", card.pretty()),
            GameEvent::TochooPickup { seat, cards } => {
                println!("* seat {seat} picks up {} cards", cards.len());
            }
            GameEvent::TrickDiscarded { winner, cards } => {
                println!("* {} cards discarded, seat {winner} leads", cards.len());
            }
            GameEvent::SeatFinished { seat, rank } => {
                println!("* seat {seat} is out of cards (#{rank})");
            }
            GameEvent::GameEnded { ranking } => {
                if let Some(loser) = ranking.last() {
                    println!("* game over: seat {loser} is the bhabhi. type reset or quit");
                }
            }
            _ => {}
        }
    }

    fn rejected(&mut self, error: &GameError) {
        println!("! {error}");
    }
}

fn render_snapshot(snap: &GameSnapshot) -> String {
    let mut out = String::new();
    let turn = snap
        .turn
        .map(|t| format!("seat {t}"))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "\n-- {:?} | turn: {turn} | tricks {} | pickups {} | discarded {}\n",
        snap.phase, snap.tricks_played, snap.pickups, snap.discarded
    ));

    for seat in &snap.seats {
        let kind = match seat.kind {
            SeatKind::Human => "human",
            SeatKind::Cpu => "cpu",
        };
        let status = match (seat.finished, seat.finish_rank) {
            (true, Some(rank)) => format!("out #{rank}"),
            (false, Some(rank)) => format!("last #{rank}"),
            _ => format!("{} cards", seat.card_count),
        };
        let marker = if snap.turn == Some(seat.id) { ">" } else { " " };
        out.push_str(&format!("{marker} seat {} ({kind}) {status}\n", seat.id));
    }

    if let Some(last) = &snap.last_trick {
        if snap.phase != Phase::Play {
            let what = match last.resolution.outcome {
                Outcome::Discard => "discarded".to_string(),
                Outcome::Pickup { receiver } => format!("picked up by seat {receiver}"),
            };
            out.push_str(&format!("  last trick: {} ({what})\n", plays_text(&last.trick.plays)));
        }
    }
    if let Some(trick) = &snap.trick {
        if !trick.plays.is_empty() {
            out.push_str(&format!("  table: {}\n", plays_text(&trick.plays)));
        }
    }

    for hand in &snap.human_hands {
        let cards: Vec<String> = hand
            .cards
            .iter()
            .map(|c| {
                if c.playable {
                    format!("[{}]", c.card.pretty())
                } else {
                    c.card.pretty()
                }
            })
            .collect();
        out.push_str(&format!("  seat {} hand: {}\n", hand.seat, cards.join(" ")));
    }
    out
}

fn plays_text(plays: &[(u8, Card)]) -> String {
    plays
        .iter()
        .map(|(seat, card)| format!("{}({seat})", card.pretty()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_stdin_reader(tx: UnboundedSender<Input>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(cmd) => {
                    if tx.send(Input::Command(cmd)).is_err() {
                        return;
                    }
                }
                Err(err) => println!("! {err}. {HELP}"),
            }
        }
        let _ = tx.send(Input::Command(Command::Quit));
    });
}

async fn run(args: Args) -> Result<(), GameError> {
    let mut config = TableConfig::from_env()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(ms) = args.cpu_delay_ms {
        config.cpu_delay_ms = ms;
    }
    if let Some(ms) = args.trick_display_ms {
        config.trick_display_ms = ms;
    }
    if let Some(timing) = args.tochoo_timing {
        config.rules.tochoo_timing = timing;
    }
    let setup: SetupConfig = args.seats.parse()?;
    info!(layout = %setup, ?config, "table configured");

    let (tx, mut rx) = unbounded_channel::<Input>();
    let mut table = Table::new(
        GameFlowService::new(config, setup),
        TerminalPresentation::new(tx.clone()),
    );
    spawn_stdin_reader(tx);

    println!("{HELP}");
    submit(&mut table, Intent::Start { seed: None })?;

    while let Some(input) = rx.recv().await {
        let intent = match input {
            Input::Timer(ticket) => Intent::TimerFired { ticket },
            Input::Command(Command::Quit) => break,
            Input::Command(Command::Help) => {
                println!("{HELP}");
                continue;
            }
            Input::Command(Command::Start) => Intent::Start { seed: None },
            Input::Command(Command::Pause) => Intent::Pause,
            Input::Command(Command::Resume) => Intent::Resume,
            Input::Command(Command::Reset) => Intent::Reset,
            Input::Command(Command::Play(card)) => match table.flow().state().turn {
                Some(seat) => Intent::PlayCard { seat, card },
                None => {
                    println!("! nobody can play right now");
                    continue;
                }
            },
        };
        submit(&mut table, intent)?;
    }
    Ok(())
}

/// Rejections are shown and play goes on; engine bugs stop the table.
fn submit(table: &mut Table<TerminalPresentation>, intent: Intent) -> Result<(), GameError> {
    match table.submit(intent) {
        Ok(_) => Ok(()),
        Err(err) if err.is_rejection() => Ok(()),
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
