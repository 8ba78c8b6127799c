// crates/battleship-server/tests/session_flow.rs
use std::time::Duration;

use battleship_core::{GameId, PlayerId};
use battleship_protocol::Response;
use battleship_server::client::run_routed;
use battleship_server::config::Config;
use battleship_server::server::serve;
use battleship_server::types::{AppState, ClientId, Session};
use battleship_server::{
    Reply, CAPACITY_REACHED, GAME_FULL, INTERNAL_ERROR, NOT_YOUR_GAME, NO_SUCH_GAME,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const FORM_A: &str = "username=alice&btlship=00,01,02,03,04&cruiser=10,11,12,13\
&frigate=20,21,22&destroyer=30,31,32&patrolboat=40,41";
const FORM_B: &str = "username=bobby&btlship=00,10,20,30,40&cruiser=02,12,22,32\
&frigate=04,14,24&destroyer=06,16,26&patrolboat=08,18";

const WAIT: Duration = Duration::from_secs(5);

struct Conn {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Conn {
    async fn open(addr: &str) -> Conn {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read, writer) = stream.into_split();
        Conn {
            lines: BufReader::new(read).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .unwrap();
    }

    async fn next_line(&mut self) -> Option<String> {
        timeout(WAIT, self.lines.next_line())
            .await
            .expect("server answered in time")
            .unwrap()
    }

    /// Send one request, collect the reply lines up to `END`.
    async fn request(&mut self, line: &str) -> Vec<String> {
        self.send(line).await;
        let mut out = Vec::new();
        loop {
            match self.next_line().await {
                Some(l) if l == "END" => return out,
                Some(l) => out.push(l),
                None => panic!("connection closed mid-reply to {line:?}"),
            }
        }
    }
}

async fn start_server(max_games: usize) -> String {
    let config = Config {
        max_games,
        keepalive_secs: 3600,
        ..Config::default()
    };
    start_server_with(&config).await.0
}

async fn start_server_with(config: &Config) -> (String, AppState) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let state = AppState::new(config);
    tokio::spawn(serve(listener, state.clone()));
    (addr, state)
}

/// `(game, player)` from a `SESSION` line.
fn session_of(reply: &[String]) -> (String, String) {
    let parts: Vec<&str> = reply[0].split(' ').collect();
    assert_eq!(parts[0], "SESSION", "{reply:?}");
    (parts[1].to_string(), parts[2].to_string())
}

fn flash_to_start(msg: &str) -> Vec<String> {
    vec![format!("FLASH {}", msg), "REDIRECT /start".to_string()]
}

#[tokio::test]
async fn create_join_fire_and_notify() {
    let addr = start_server(5).await;
    let mut alice = Conn::open(&addr).await;
    let mut bob = Conn::open(&addr).await;

    assert_eq!(alice.request("START").await, ["FORM start"]);
    let reply = alice.request(&format!("START {}", FORM_A)).await;
    let (game, alice_id) = session_of(&reply);
    assert_eq!(reply[1], format!("REDIRECT /{}", game));

    // Alice's browser opens its event stream on a second connection.
    let mut alice_events = Conn::open(&addr).await;
    assert_eq!(
        alice_events
            .request(&format!("SESSION {} {}", game, alice_id))
            .await,
        ["OK"]
    );
    alice_events.send("EVENTS").await;

    assert_eq!(
        bob.request(&format!("JOIN {}", game)).await,
        [format!("FORM join {}", game), "OPPONENT alice".to_string()]
    );
    let reply = bob.request(&format!("JOIN {} {}", game, FORM_B)).await;
    assert_eq!(session_of(&reply).0, game);

    // The join wakes Alice's stream, which then closes.
    assert_eq!(alice_events.next_line().await.as_deref(), Some("data: refresh"));
    assert_eq!(alice_events.next_line().await.as_deref(), Some(""));
    assert_eq!(alice_events.next_line().await, None);

    let view = alice.request(&format!("VIEW {}", game)).await;
    assert_eq!(&view[..3], ["STATUS 1", "TURN yes", "OPPONENT bobby"]);
    assert_eq!(view[3], "BOARD 0 end_left mid_h mid_h mid_h end_right . . . . .");
    assert_eq!(
        &view[view.len() - 2..],
        ["MSG bobby has joined the game", "MSG It's your turn to play."]
    );

    assert_eq!(
        alice.request(&format!("FIRE {} target_pos=00", game)).await,
        [format!("REDIRECT /{}", game)]
    );
    // Out of turn: bounced, nothing recorded.
    alice.request(&format!("FIRE {} target_pos=01", game)).await;

    let view = bob.request(&format!("VIEW {}", game)).await;
    assert_eq!(&view[..3], ["STATUS 1", "TURN yes", "OPPONENT alice"]);
    assert_eq!(
        view[3],
        "BOARD 0 end_top_fire . end_top . end_top . end_top . end_top ."
    );
    assert_eq!(
        &view[view.len() - 2..],
        ["MSG You have been hit.", "MSG Your turn to play."]
    );

    let view = alice.request(&format!("VIEW {}", game)).await;
    assert_eq!(view[1], "TURN no");
    assert_eq!(view[13], "SHOTS 0 hit_bomb . . . . . . . . .");

    // An unreadable target keeps the turn and says why.
    bob.request(&format!("FIRE {} target_pos=7", game)).await;
    let view = bob.request(&format!("VIEW {}", game)).await;
    assert_eq!(view[1], "TURN yes");
    assert_eq!(
        view.last().unwrap(),
        "MSG You have entered an invalid firing position. Try again."
    );

    assert_eq!(alice.request("HOME").await, [format!("REDIRECT /{}", game)]);
}

#[tokio::test]
async fn admission_checks_redirect_with_flash() {
    let addr = start_server(5).await;
    let mut alice = Conn::open(&addr).await;
    let mut bob = Conn::open(&addr).await;
    let mut carol = Conn::open(&addr).await;

    let (game, _) = session_of(&alice.request(&format!("START {}", FORM_A)).await);

    assert_eq!(
        carol.request("VIEW no-such-game").await,
        flash_to_start(NO_SUCH_GAME)
    );
    assert_eq!(
        carol.request("JOIN no-such-game").await,
        flash_to_start(NO_SUCH_GAME)
    );
    assert_eq!(
        carol.request(&format!("VIEW {}", game)).await,
        flash_to_start(NOT_YOUR_GAME)
    );
    assert_eq!(
        carol.request(&format!("FIRE {} target_pos=00", game)).await,
        flash_to_start(NOT_YOUR_GAME)
    );

    bob.request(&format!("JOIN {} {}", game, FORM_B)).await;
    assert_eq!(
        carol.request(&format!("JOIN {}", game)).await,
        flash_to_start(GAME_FULL)
    );
    assert_eq!(
        carol.request(&format!("JOIN {} {}", game, FORM_B)).await,
        flash_to_start(GAME_FULL)
    );

    assert_eq!(carol.request("HOME").await, ["REDIRECT /start"]);
    assert_eq!(carol.request("EVENTS").await, ["ERROR no session"]);
}

#[tokio::test]
async fn invalid_forms_and_capacity() {
    let addr = start_server(1).await;
    let mut alice = Conn::open(&addr).await;
    let mut carol = Conn::open(&addr).await;

    let bad = FORM_A.replace("username=alice", "username=al");
    assert_eq!(
        alice.request(&format!("START {}", bad)).await,
        [
            "FORM start",
            "INVALID username This field is too short (minimum is 4 characters)",
        ]
    );

    let overlapping = FORM_A.replace("cruiser=10,11,12,13", "cruiser=04,14,24,34");
    assert_eq!(
        alice.request(&format!("START {}", overlapping)).await,
        ["FORM start", "INVALID cruiser 04 is overlapping"]
    );

    session_of(&alice.request(&format!("START {}", FORM_A)).await);

    let reject = [format!("REJECT {}", CAPACITY_REACHED)];
    assert_eq!(carol.request("START").await, reject);
    assert_eq!(carol.request(&format!("START {}", FORM_B)).await, reject);

    assert_eq!(
        carol.request("LAUNCH now").await,
        ["ERROR unknown command \"LAUNCH\""]
    );
}

#[tokio::test]
async fn finished_game_is_torn_down_as_players_leave() {
    let addr = start_server(5).await;
    let mut alice = Conn::open(&addr).await;
    let mut bob = Conn::open(&addr).await;
    let mut carol = Conn::open(&addr).await;

    let (game, _) = session_of(&alice.request(&format!("START {}", FORM_A)).await);
    bob.request(&format!("JOIN {} {}", game, FORM_B)).await;

    let targets = [
        0, 10, 20, 30, 40, 2, 12, 22, 32, 4, 14, 24, 6, 16, 26, 8, 18,
    ];
    let misses: Vec<u8> = (50..100).filter(|c| c % 10 >= 5).collect();
    for (i, target) in targets.iter().enumerate() {
        alice
            .request(&format!("FIRE {} target_pos={:02}", game, target))
            .await;
        if i + 1 < targets.len() {
            bob.request(&format!("FIRE {} target_pos={:02}", game, misses[i]))
                .await;
        }
    }

    let view = alice.request(&format!("VIEW {}", game)).await;
    assert_eq!(&view[..2], ["STATUS 2", "TURN no"]);
    assert_eq!(view.last().unwrap(), "MSG You are the WINNER!");

    // Alice has left: her session is gone, the game stays for Bob.
    assert_eq!(alice.request("HOME").await, ["REDIRECT /start"]);
    assert_eq!(
        alice.request(&format!("VIEW {}", game)).await,
        flash_to_start(NOT_YOUR_GAME)
    );

    // A free seat in a finished game cannot be taken.
    assert_eq!(
        carol.request(&format!("JOIN {}", game)).await,
        flash_to_start(GAME_FULL)
    );
    assert_eq!(
        carol
            .request(&format!("JOIN {} username=x", game))
            .await,
        flash_to_start(GAME_FULL)
    );

    let view = bob.request(&format!("VIEW {}", game)).await;
    assert_eq!(view[0], "STATUS 2");
    assert_eq!(view.last().unwrap(), "MSG You have lost the game.");

    // Last one out removes the game.
    assert_eq!(
        carol.request(&format!("VIEW {}", game)).await,
        flash_to_start(NO_SUCH_GAME)
    );
}

#[tokio::test]
async fn event_stream_keeps_alive_until_client_hangs_up() {
    let config = Config {
        keepalive_secs: 1,
        ..Config::default()
    };
    let (addr, state) = start_server_with(&config).await;
    let mut alice = Conn::open(&addr).await;
    let (game, alice_id) = session_of(&alice.request(&format!("START {}", FORM_A)).await);

    let mut events = Conn::open(&addr).await;
    assert_eq!(
        events.request(&format!("SESSION {} {}", game, alice_id)).await,
        ["OK"]
    );
    events.send("EVENTS").await;

    assert_eq!(events.next_line().await.as_deref(), Some("data: stay alive"));
    assert_eq!(events.next_line().await.as_deref(), Some(""));
    assert_eq!(state.connections.read().await.len(), 2);

    drop(events);
    timeout(WAIT, async {
        while state.connections.read().await.len() > 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("hung-up stream is deregistered");

    // The game itself is untouched.
    let view = alice.request(&format!("VIEW {}", game)).await;
    assert_eq!(&view[..2], ["STATUS 0", "TURN no"]);
}

async fn exploding_handler() -> Reply {
    panic!("handler bug")
}

#[tokio::test]
async fn panicking_handler_keeps_session_and_answers_error() {
    let session = Some(Session {
        game: GameId::from("game-1"),
        player: PlayerId::from("player-1"),
    });

    let reply = run_routed(ClientId(7), session.clone(), exploding_handler()).await;

    assert_eq!(reply.session, session);
    assert_eq!(
        reply.responses,
        [Response::Error(INTERNAL_ERROR.to_string())]
    );
}
