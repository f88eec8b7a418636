//! End-to-end tests against a scripted API server
//!
//! Each test binds a real TCP listener speaking the framed protocol,
//! scripts its answers, and drives the public client surface against it.
//! Logins are counted so connection reuse and recovery are observable.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use vndb_client::{
    ClientConfig, Dispatcher, Filter, ServerError, SessionPool, Vndb, VndbError, VndbFlag,
    VnListUpdate, VoteUpdate,
};

const EOT: u8 = 0x04;

/// How the scripted server answers one received command.
enum ServerAction {
    /// Send this response, framed.
    Reply(String),
    /// Close the connection without answering.
    Close,
}

type Script = Arc<dyn Fn(&str) -> ServerAction + Send + Sync>;

/// A scripted stand-in for the API server.
///
/// Accepts any number of connections and feeds every framed command
/// through the script. Login commands are counted; commands other than
/// login are recorded for later inspection.
struct ScriptedServer {
    addr: SocketAddr,
    logins: Arc<AtomicUsize>,
    commands: Arc<Mutex<Vec<String>>>,
}

impl ScriptedServer {
    async fn start<F>(script: F) -> Self
    where
        F: Fn(&str) -> ServerAction + Send + Sync + 'static,
    {
        // Route client logs to the test output when RUST_LOG asks for them.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let logins = Arc::new(AtomicUsize::new(0));
        let commands = Arc::new(Mutex::new(Vec::new()));
        let script: Script = Arc::new(script);

        let login_counter = Arc::clone(&logins);
        let command_log = Arc::clone(&commands);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(serve_connection(
                    stream,
                    Arc::clone(&script),
                    Arc::clone(&login_counter),
                    Arc::clone(&command_log),
                ));
            }
        });

        Self {
            addr,
            logins,
            commands,
        }
    }

    /// Configuration pointing at this server, default pool.
    fn config(&self) -> ClientConfig {
        self.config_with_pool(5)
    }

    fn config_with_pool(&self, pool_size: usize) -> ClientConfig {
        ClientConfig {
            host: self.addr.ip().to_string(),
            port: Some(self.addr.port()),
            pool_size,
            ..ClientConfig::default()
        }
    }

    /// How many login commands arrived so far.
    fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    /// Every non-login command received so far, in arrival order.
    fn received(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

/// Answer framed commands on one connection until it closes or the script
/// hangs up.
async fn serve_connection(
    mut stream: TcpStream,
    script: Script,
    logins: Arc<AtomicUsize>,
    commands: Arc<Mutex<Vec<String>>>,
) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buffer.extend_from_slice(&chunk[..read]);

        while let Some(end) = buffer.iter().position(|&b| b == EOT) {
            let frame: Vec<u8> = buffer.drain(..=end).collect();
            let command = String::from_utf8_lossy(&frame[..frame.len() - 1]).into_owned();
            if command.starts_with("login ") {
                logins.fetch_add(1, Ordering::SeqCst);
            } else {
                commands.lock().unwrap().push(command.clone());
            }

            match script(&command) {
                ServerAction::Reply(response) => {
                    let mut framed = response.into_bytes();
                    framed.push(EOT);
                    if stream.write_all(&framed).await.is_err() {
                        return;
                    }
                }
                ServerAction::Close => return,
            }
        }
    }
}

/// Script wrapper acknowledging every login with `ok`, so tests only
/// script the commands they are about.
fn logins_ok<F>(script: F) -> impl Fn(&str) -> ServerAction + Send + Sync
where
    F: Fn(&str) -> ServerAction + Send + Sync + 'static,
{
    move |command: &str| {
        if command.starts_with("login ") {
            ServerAction::Reply("ok".to_string())
        } else {
            script(command)
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

/// A full query through the facade: command rendering, envelope decoding.
#[tokio::test]
async fn test_get_visual_novel_round_trip() {
    let server = ScriptedServer::start(logins_ok(|_| {
        ServerAction::Reply(
            r#"results {"num":1,"more":false,"items":[{"id":17,"title":"Ever17"}]}"#.to_string(),
        )
    }))
    .await;

    let client = Vndb::new(server.config());
    let reply = client
        .get_visual_novel(&Filter::new("id = 17"), &[VndbFlag::Basic], None)
        .await
        .unwrap();

    let set = reply.data().expect("query was accepted");
    assert_eq!(set.num, 1);
    assert!(!set.more);
    assert_eq!(set.items[0].id, 17);
    assert_eq!(set.items[0].title.as_deref(), Some("Ever17"));
    assert_eq!(server.received(), ["get vn basic (id = 17)"]);
}

/// The dispatcher decodes into whatever shape the caller asks for,
/// including a bare row array.
#[tokio::test]
async fn test_dispatcher_decodes_a_bare_row_array() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct MiniRow {
        id: u32,
        title: String,
    }

    let server = ScriptedServer::start(logins_ok(|_| {
        ServerAction::Reply(r#"results [{"id":17,"title":"Ever17"}]"#.to_string())
    }))
    .await;

    let dispatcher = Dispatcher::new(SessionPool::new(server.config()));
    let reply = dispatcher
        .execute_get::<Vec<MiniRow>>("get vn basic (id = 17)".to_string())
        .await
        .unwrap();

    let rows = reply.data().expect("query was accepted");
    assert_eq!(
        rows,
        [MiniRow {
            id: 17,
            title: "Ever17".to_string(),
        }]
    );
}

/// `dbstats` answers with its own verb and decodes into the stats model.
#[tokio::test]
async fn test_get_database_stats() {
    let server = ScriptedServer::start(logins_ok(|_| {
        ServerAction::Reply(
            r#"dbstats {"users":1000,"vn":2000,"chars":3000,"releases":4000}"#.to_string(),
        )
    }))
    .await;

    let client = Vndb::new(server.config());
    let reply = client.get_database_stats().await.unwrap();

    let stats = reply.data().expect("query was accepted");
    assert_eq!(stats.users, 1000);
    assert_eq!(stats.visual_novels, 2000);
    assert_eq!(stats.characters, 3000);
    assert_eq!(stats.releases, 4000);
    assert_eq!(server.received(), ["dbstats"]);
}

/// A throttled rejection travels as data with its waits intact, and the
/// session stays logged in for the next command.
#[tokio::test]
async fn test_throttled_rejection_keeps_the_session() {
    let calls = AtomicUsize::new(0);
    let server = ScriptedServer::start(logins_ok(move |_| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            ServerAction::Reply(
                r#"error {"id":"throttled","type":"cmd","minwait":60,"fullwait":180,"msg":"Too many commands"}"#
                    .to_string(),
            )
        } else {
            ServerAction::Reply(
                r#"results {"num":1,"more":false,"items":[{"id":17,"title":"Ever17"}]}"#
                    .to_string(),
            )
        }
    }))
    .await;

    let client = Vndb::new(server.config_with_pool(1));
    let filter = Filter::new("id = 17");

    let first = client
        .get_visual_novel(&filter, &[VndbFlag::Basic], None)
        .await
        .unwrap();
    match first.rejected().expect("server scripted a rejection") {
        ServerError::Throttled {
            kind,
            min_wait,
            full_wait,
            ..
        } => {
            assert_eq!(kind, "cmd");
            assert_eq!(min_wait, 60.0);
            assert_eq!(full_wait, 180.0);
        }
        other => panic!("classified as {:?}", other),
    }

    let second = client
        .get_visual_novel(&filter, &[VndbFlag::Basic], None)
        .await
        .unwrap();
    assert!(second.is_data());
    assert_eq!(server.login_count(), 1, "a rejection must not cost the login");
}

/// A bare `ok` is a legal wire shape but can never answer a query; the
/// dispatcher refuses it without costing the session its login.
#[tokio::test]
async fn test_ok_answering_a_query_is_a_violation() {
    let calls = AtomicUsize::new(0);
    let server = ScriptedServer::start(logins_ok(move |_| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            ServerAction::Reply("ok".to_string())
        } else {
            ServerAction::Reply(r#"dbstats {"users":7}"#.to_string())
        }
    }))
    .await;

    let client = Vndb::new(server.config_with_pool(1));

    match client.get_database_stats().await.unwrap_err() {
        VndbError::UnexpectedResponse { request, response } => {
            assert_eq!(request, "dbstats");
            assert_eq!(response, "ok");
        }
        other => panic!("got {:?}", other),
    }

    let reply = client.get_database_stats().await.unwrap();
    assert!(reply.is_data());
    assert_eq!(server.login_count(), 1, "a legal reply shape must not cost the login");
}

// =============================================================================
// Mutations
// =============================================================================

/// A mutation renders its JSON body and a bare `ok` acknowledges it.
#[tokio::test]
async fn test_set_acknowledged_with_ok() {
    let server =
        ScriptedServer::start(logins_ok(|_| ServerAction::Reply("ok".to_string()))).await;

    let client = Vndb::new(server.config());
    let reply = client
        .set_vote_list(17, Some(&VoteUpdate { vote: Some(85) }))
        .await
        .unwrap();

    assert!(reply.is_data());
    assert_eq!(server.received(), ["set votelist 17 {\"vote\":85}"]);
}

/// The server judges field values; a bad one comes back as a structured
/// rejection naming the field.
#[tokio::test]
async fn test_set_rejection_preserves_the_field() {
    let server = ScriptedServer::start(logins_ok(|_| {
        ServerAction::Reply(
            r#"error {"id":"badarg","field":"status","msg":"Invalid status"}"#.to_string(),
        )
    }))
    .await;

    let client = Vndb::new(server.config());
    let update = VnListUpdate {
        status: Some(5),
        ..VnListUpdate::default()
    };
    let reply = client.set_visual_novel_list(17, Some(&update)).await.unwrap();

    assert_eq!(
        reply.rejected(),
        Some(ServerError::BadArgument {
            msg: "Invalid status".to_string(),
            field: "status".to_string(),
        })
    );
    assert_eq!(server.received(), ["set vnlist 17 {\"status\":5}"]);
}

/// A result payload is a legal wire shape but can never answer a
/// mutation; the error reproduces what came back.
#[tokio::test]
async fn test_results_answering_a_mutation_is_a_violation() {
    let server = ScriptedServer::start(logins_ok(|_| {
        ServerAction::Reply(r#"results {"num":0,"more":false,"items":[]}"#.to_string())
    }))
    .await;

    let client = Vndb::new(server.config());
    let err = client
        .set_vote_list(17, Some(&VoteUpdate { vote: Some(85) }))
        .await
        .unwrap_err();

    match err {
        VndbError::UnexpectedResponse { request, response } => {
            assert_eq!(request, "set votelist 17 {\"vote\":85}");
            assert_eq!(response, r#"results {"num":0,"more":false,"items":[]}"#);
        }
        other => panic!("got {:?}", other),
    }
}

// =============================================================================
// Login
// =============================================================================

/// A refused login is a rejection, not a failure.
#[tokio::test]
async fn test_rejected_login_is_data_not_failure() {
    let server = ScriptedServer::start(|_| {
        ServerAction::Reply(r#"error {"id":"auth","msg":"Wrong password"}"#.to_string())
    })
    .await;

    let client = Vndb::new(server.config());
    let reply = client.get_database_stats().await.unwrap();

    assert_eq!(
        reply.rejected(),
        Some(ServerError::BadAuthentication {
            msg: "Wrong password".to_string(),
        })
    );
    assert!(server.received().is_empty(), "the query must not be sent");
}

/// A connection dying mid-login is a protocol violation, and the error
/// names the login without reproducing the command.
#[tokio::test]
async fn test_connection_loss_during_login_is_a_violation() {
    let server = ScriptedServer::start(|_| ServerAction::Close).await;

    let client = Vndb::new(server.config());
    let err = client.get_database_stats().await.unwrap_err();

    match err {
        VndbError::UnexpectedResponse { request, response } => {
            assert_eq!(request, "login");
            assert_eq!(response, "");
        }
        other => panic!("got {:?}", other),
    }
}

/// A login answered with something other than `ok` or an error frame is
/// a protocol violation, reported without reproducing the command.
#[tokio::test]
async fn test_garbled_login_response_is_a_violation() {
    let server =
        ScriptedServer::start(|_| ServerAction::Reply("welcome aboard".to_string())).await;

    let client = Vndb::new(server.config());
    let err = client.get_database_stats().await.unwrap_err();

    match err {
        VndbError::UnexpectedResponse { request, response } => {
            assert_eq!(request, "login");
            assert_eq!(response, "welcome aboard");
        }
        other => panic!("got {:?}", other),
    }
    assert!(server.received().is_empty(), "the query must not be sent");
}

// =============================================================================
// Recovery
// =============================================================================

/// A connection lost mid-exchange fails that request and the next one
/// logs in again on a fresh connection.
#[tokio::test]
async fn test_relogin_after_connection_loss() {
    let drops = AtomicUsize::new(0);
    let server = ScriptedServer::start(logins_ok(move |_| {
        if drops.fetch_add(1, Ordering::SeqCst) == 0 {
            ServerAction::Close
        } else {
            ServerAction::Reply(r#"dbstats {"users":7}"#.to_string())
        }
    }))
    .await;

    let client = Vndb::new(server.config_with_pool(1));

    let err = client.get_database_stats().await.unwrap_err();
    assert!(matches!(err, VndbError::UnexpectedResponse { .. }));

    let reply = client.get_database_stats().await.unwrap();
    assert_eq!(reply.data().expect("retry was accepted").users, 7);
    assert_eq!(server.login_count(), 2, "recovery requires a second login");
}

/// A response outside the protocol shapes tears the session down; the
/// error carries the offending text and the next command starts over.
#[tokio::test]
async fn test_unexpected_verb_tears_down_and_recovers() {
    let faults = AtomicUsize::new(0);
    let server = ScriptedServer::start(logins_ok(move |_| {
        if faults.fetch_add(1, Ordering::SeqCst) == 0 {
            ServerAction::Reply("mystery 42".to_string())
        } else {
            ServerAction::Reply(r#"dbstats {"users":7}"#.to_string())
        }
    }))
    .await;

    let client = Vndb::new(server.config_with_pool(1));

    match client.get_database_stats().await.unwrap_err() {
        VndbError::UnexpectedResponse { request, response } => {
            assert_eq!(request, "dbstats");
            assert_eq!(response, "mystery 42");
        }
        other => panic!("got {:?}", other),
    }

    let reply = client.get_database_stats().await.unwrap();
    assert!(reply.is_data());
    assert_eq!(server.login_count(), 2);
}

// =============================================================================
// Raw commands and local failures
// =============================================================================

/// Raw commands pass through verbatim and the response text comes back
/// undecoded, verb included.
#[tokio::test]
async fn test_raw_passthrough_returns_undecoded_text() {
    let response = r#"results {"num":0,"more":false,"items":[]}"#;
    let server =
        ScriptedServer::start(logins_ok(move |_| ServerAction::Reply(response.to_string())))
            .await;

    let client = Vndb::new(server.config());
    let reply = client.raw("get votelist basic (uid = 0)").await.unwrap();

    assert_eq!(reply.data().as_deref(), Some(response));
    assert_eq!(server.received(), ["get votelist basic (uid = 0)"]);
}

/// Flag validation happens before any I/O, so a bad query costs nothing.
#[tokio::test]
async fn test_invalid_flags_fail_before_any_io() {
    let server =
        ScriptedServer::start(logins_ok(|_| ServerAction::Reply("ok".to_string()))).await;

    let client = Vndb::new(server.config());
    let err = client
        .get_user(&Filter::new("id = 1"), &[VndbFlag::Details], None)
        .await
        .unwrap_err();

    match err {
        VndbError::InvalidFlags { verb, flag } => {
            assert_eq!(verb, "user");
            assert_eq!(flag, "details");
        }
        other => panic!("got {:?}", other),
    }
    assert_eq!(server.login_count(), 0);
    assert!(server.received().is_empty());
}

/// A closed client refuses new requests instead of reconnecting.
#[tokio::test]
async fn test_closed_client_refuses_new_requests() {
    let server =
        ScriptedServer::start(logins_ok(|_| ServerAction::Reply("ok".to_string()))).await;

    let client = Vndb::new(server.config());
    client.close().await;

    let err = client.get_database_stats().await.unwrap_err();
    assert!(matches!(err, VndbError::PoolClosed));
}
