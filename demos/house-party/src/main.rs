//! A scripted house party: one full session against the in-memory
//! store, narrating every step. Run with `RUST_LOG=debug` to watch the
//! orchestrator's structured logs interleave with the narration.

use parlor::{GameServiceBuilder, GameSession, MemoryStore, ParlorError};

fn show(label: &str, game: &GameSession) {
    let roster: Vec<&str> =
        game.players.iter().map(|p| p.name.as_str()).collect();
    let turn = game
        .current_answerer
        .as_ref()
        .and_then(|id| game.players.iter().find(|p| p.id == *id))
        .map_or("-", |p| p.name.as_str());
    println!(
        "{label:<28} players={roster:?} turn={turn} level={} drawn={}",
        game.level, game.cards_drawn
    );
}

#[tokio::main]
async fn main() -> Result<(), ParlorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let service = GameServiceBuilder::new(MemoryStore::new()).build();

    // Alice opens the game and is its host.
    let alice = service.create_game("Alice").await?;
    let gid = alice.game.id.clone();
    show("Alice creates the game", &alice.game);

    let bob = service.join_game(&gid, "Bob").await?;
    let cleo = service.join_game(&gid, "Cleo").await?;
    show("Bob and Cleo join", &cleo.game);

    // Only the host may bootstrap the first draw.
    let game = service.draw_card(&gid, &alice.key).await?;
    show("Alice draws (bootstrap)", &game);

    let game = service.draw_card(&gid, &alice.key).await?;
    show("Alice draws, turn passes", &game);

    // Bob would rather not answer this one.
    let game = service.skip_turn(&gid, &bob.key).await?;
    show("Bob skips his turn", &game);

    // Cleo tries a host-only action and is told no.
    match service.jump_to_level(&gid, &cleo.key, 3).await {
        Err(e) => println!("{:<28} {} (code {})", "Cleo tries level 3", e, e.code()),
        Ok(_) => unreachable!("only the host may change the level"),
    }

    let game = service.jump_to_level(&gid, &alice.key, 3).await?;
    show("Alice raises to level 3", &game);

    // The host shows Cleo the door; her key stops working.
    let cleo_id = cleo.game.players[2].id.clone();
    let game = service.kick_player(&gid, &alice.key, &cleo_id).await?;
    show("Alice kicks Cleo", &game);
    match service.get_game(&gid, &cleo.key).await {
        Err(e) => println!("{:<28} {} (code {})", "Cleo's key afterwards", e, e.code()),
        Ok(_) => unreachable!("a revoked key must not authenticate"),
    }

    Ok(())
}
