//! End-to-end demo of both mixing strategies.
//!
//! Run with: `RUST_LOG=debug cargo run --example demo`
//!
//! 1. **Random mix** — the same seven-a-side roster is split twice with the
//!    same seed (identical result) and once with another seed.
//! 2. **Skill-balanced mix** — the split with the smallest skill difference.
//! 3. **Anchorages** — two pairs of friends are kept together under both
//!    strategies.
//! 4. **Infeasible anchorage** — a group holding both goalkeepers is
//!    rejected before any player is touched.

use team_mixer::{
    mix, DistributionEngine, MixConfig, MixRequest, Player, Position, Roster, Strategy, Team,
};

fn roster() -> team_mixer::Result<Roster> {
    let players = vec![
        Player::new("Bruno", Position::CentralDefender).with_skill(4),
        Player::new("Carlos", Position::CentralDefender).with_skill(2),
        Player::new("Diego", Position::CentralDefender).with_skill(5),
        Player::new("Emilio", Position::CentralDefender).with_skill(3),
        Player::new("Fabián", Position::LateralDefender).with_skill(3),
        Player::new("Gonzalo", Position::LateralDefender).with_skill(1),
        Player::new("Hernán", Position::LateralDefender).with_skill(4),
        Player::new("Iván", Position::LateralDefender).with_skill(2),
        Player::new("Julián", Position::Midfielder).with_skill(5),
        Player::new("Kevin", Position::Midfielder).with_skill(3),
        Player::new("Lucas", Position::Forward).with_skill(4),
        Player::new("Mateo", Position::Forward).with_skill(5),
        Player::new("Nicolás", Position::Goalkeeper).with_skill(2),
        Player::new("Oscar", Position::Goalkeeper).with_skill(3),
    ];
    Roster::new(players, &MixConfig::default())
}

fn print_teams(title: &str, (one, two): &(Team, Team)) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {title}  (skill difference {})", one.skill().abs_diff(two.skill()));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print!("{one}");
    print!("{two}");
    println!();
}

fn main() -> team_mixer::Result<()> {
    env_logger::init();

    // ── Random mix ─────────────────────────────────────────────────────────
    let mut r = roster()?;
    let mut engine = DistributionEngine::with_seed(MixConfig::default(), 7);
    let teams = engine.distribute(&mut r, Strategy::Random, false)?;
    print_teams("Random mix, seed 7", &teams);

    let first = r.assignment();
    let mut again = roster()?;
    mix(&mut again, &MixRequest { strategy: Strategy::Random, anchorages: false, rng_seed: Some(7) })?;
    println!("  Same seed, same split: {}", first == again.assignment());

    engine.reset(&mut r);
    let teams = engine.distribute(&mut r, Strategy::Random, false)?;
    print_teams("Random mix, next draw", &teams);

    // ── Skill-balanced mix ─────────────────────────────────────────────────
    let mut r = roster()?;
    let teams = mix(&mut r, &MixRequest::new(Strategy::SkillBalanced))?;
    print_teams("Skill-balanced mix", &teams);

    // ── Anchorages ─────────────────────────────────────────────────────────
    for strategy in [Strategy::Random, Strategy::SkillBalanced] {
        let mut r = roster()?;
        r.set_anchorage("Diego", 1)?;
        r.set_anchorage("Julián", 1)?;
        r.set_anchorage("Mateo", 2)?;
        r.set_anchorage("Hernán", 2)?;
        let teams = mix(&mut r, &MixRequest { strategy, anchorages: true, rng_seed: Some(3) })?;
        print_teams(&format!("{strategy} with anchorages"), &teams);
    }

    // ── Infeasible anchorage ───────────────────────────────────────────────
    let mut r = roster()?;
    r.set_anchorage("Nicolás", 5)?;
    r.set_anchorage("Oscar", 5)?;
    match mix(&mut r, &MixRequest { strategy: Strategy::Random, anchorages: true, rng_seed: Some(1) }) {
        Ok(_) => println!("  unexpected: both goalkeepers fit on one team"),
        Err(e) => println!("  Rejected: {e} (roster untouched: {})", r.is_unassigned()),
    }

    Ok(())
}
