//! Engine task: ordering, single in-flight request, blocking client.

use std::time::Duration;

use tokio::sync::mpsc;

use boundary_life::core::{Grid, SimpleRng};
use boundary_life::engine::{run_engine, spawn_engine, Command, EngineError, EngineWorker, Outcome};
use boundary_life::types::{pulse_width, BoundaryType};

fn init_from(grid: Grid) -> Command {
    let (columns, rows, boundary_rows) = (grid.columns(), grid.rows(), grid.boundary_rows());
    let (cells, active_cells) = grid.into_parts();
    Command::Init {
        cells,
        active_cells,
        column_count: columns,
        row_count: rows,
        boundary_rows,
        boundary_type: BoundaryType::Nothing,
        pulse_width: pulse_width(5),
        pulse_offset: 0,
    }
}

fn step_nothing() -> Command {
    Command::Step {
        boundary_type: BoundaryType::Nothing,
        pulse_width: pulse_width(5),
        pulse_offset: 0,
    }
}

fn blinker() -> Command {
    init_from(Grid::with_live_cells(5, 5, 0, &[(1, 2), (2, 2), (3, 2)]))
}

#[tokio::test]
async fn replies_arrive_in_request_order() {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(8);
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Outcome>();
    let task = tokio::spawn(run_engine(cmd_rx, out_tx));

    let grid = Grid::with_live_cells(9, 9, 0, &[(1, 2), (2, 2), (3, 2)]);
    cmd_tx.send(init_from(grid)).await.unwrap();
    cmd_tx.send(step_nothing()).await.unwrap();
    cmd_tx.send(Command::Toggle { index: 80 }).await.unwrap();
    cmd_tx.send(step_nothing()).await.unwrap();
    drop(cmd_tx);

    let mut live = Vec::new();
    while let Some(outcome) = out_rx.recv().await {
        live.push(outcome.unwrap().live_cell_count);
    }
    // init 3, step 3 (vertical), toggle adds one, step kills the loner.
    assert_eq!(live, vec![3, 3, 4, 3]);
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("engine task did not stop")
        .unwrap();
}

#[tokio::test]
async fn second_request_while_in_flight_is_busy() {
    let (mut client, _task) = spawn_engine();

    client.try_send(blinker()).unwrap();
    assert!(client.is_busy());
    let err = client.try_send(step_nothing()).unwrap_err();
    assert!(matches!(err, EngineError::Busy));

    let outcome = loop {
        if let Some(outcome) = client.try_recv() {
            break outcome;
        }
        tokio::task::yield_now().await;
    };
    assert_eq!(outcome.unwrap().live_cell_count, 3);
    assert!(!client.is_busy());

    let reply = client.request(step_nothing()).await.unwrap();
    let mut cells = reply.active_cells;
    cells.sort_unstable();
    assert_eq!(cells, vec![7, 12, 17]);
}

#[tokio::test]
async fn step_before_init_is_an_error_not_silence() {
    let (mut client, _task) = spawn_engine();
    let outcome = client.request(step_nothing()).await;
    assert!(matches!(outcome, Err(EngineError::NotInitialized)));
    // The slot is free again.
    assert!(client.request(blinker()).await.is_ok());
}

#[tokio::test]
async fn invalid_init_reports_grid_error() {
    let (mut client, _task) = spawn_engine();
    let outcome = client
        .request(Command::Init {
            cells: vec![0; 10],
            active_cells: vec![],
            column_count: 3,
            row_count: 3,
            boundary_rows: 0,
            boundary_type: BoundaryType::Pulse,
            pulse_width: pulse_width(5),
            pulse_offset: 0,
        })
        .await;
    let err = outcome.unwrap_err();
    assert_eq!(err.code(), "invalid_init");
}

#[tokio::test]
async fn closed_engine_reports_disconnected() {
    let (mut client, task) = spawn_engine();
    task.abort();
    let _ = task.await;
    let outcome = client.request(step_nothing()).await;
    assert!(matches!(outcome, Err(EngineError::Disconnected)));
}

#[test]
fn blocking_worker_serves_a_synchronous_host() {
    let mut grid = Grid::new(64, 64, 4);
    grid.random_fill(&mut SimpleRng::new(11));
    let live = grid.live_count();

    let mut worker = EngineWorker::start().unwrap();
    let reply = worker.request_blocking(init_from(grid)).unwrap();
    assert_eq!(reply.live_cell_count, live);

    for _ in 0..10 {
        let reply = worker.request_blocking(step_nothing()).unwrap();
        assert_eq!(reply.live_cell_count, reply.active_cells.len());
    }
    assert!(!worker.is_finished());
}

#[test]
fn client_request_future_completes_under_block_on() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (mut client, _task) = {
        let _guard = rt.enter();
        spawn_engine()
    };

    let reply = rt.block_on(client.request(blinker())).unwrap();
    assert_eq!(reply.live_cell_count, 3);

    // tokio-test drives the same future type on a fresh current-thread runtime;
    // the engine keeps running on `rt`.
    let reply = tokio_test::block_on(client.request(step_nothing())).unwrap();
    assert_eq!(reply.live_cell_count, 3);
}
