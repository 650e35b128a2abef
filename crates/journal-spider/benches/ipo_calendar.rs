use criterion::async_executor::FuturesExecutor;
use criterion::*;
use journal_spider::api::{send_data, Template};
use journal_spider::investment::ipo::{parse_calendar, Ipo, IpoClient};
use journal_spider::store::MemoryTaskStore;
use std::fs::File;
use std::io::Read;

// read a json file to a string
#[inline]
fn read_file_to_string(path: &str) -> String {
    let mut file = File::open(path)
        .map_err(|err| {
            println!("Unable to open file: {:?}", err);
            err
        })
        .unwrap();
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .expect("Unable to read file");
    contents
}

// deserialize the calendar (from a string)
// ----------------------------------------------------------
fn benchmark_deserialization(c: &mut Criterion) {
    let file_contents = read_file_to_string("./benches/files/ipos.json");

    c.bench_function("deserialize ipos", |b| {
        b.iter(|| {
            let _ipos: Vec<Ipo> = parse_calendar(black_box(&file_contents)).unwrap();
        })
    });
}

// transform ipos into tasks
// ----------------------------------------------------------
fn benchmark_transformation(c: &mut Criterion) {
    let ipos = parse_calendar(&read_file_to_string("./benches/files/ipos.json")).unwrap();
    let now = chrono::Utc::now();

    c.bench_function("transform ipos", |b| {
        b.iter(|| {
            for ipo in black_box(&ipos) {
                let raw = serde_json::to_string(ipo).unwrap();
                black_box(IpoClient::build_task(ipo, IpoClient::uid(ipo), raw, now));
            }
        })
    });
}

// send ipos to an in-memory store
// ----------------------------------------------------------
fn benchmark_send(c: &mut Criterion) {
    let ipos = parse_calendar(&read_file_to_string("./benches/files/ipos.json")).unwrap();

    c.bench_function("send ipos", |b| {
        b.to_async(FuturesExecutor).iter(|| async {
            let store = MemoryTaskStore::new();
            black_box(send_data::<IpoClient>(&store, &ipos).await);
        })
    });
}

criterion_group!(
    benches,
    benchmark_deserialization,
    benchmark_transformation,
    benchmark_send
);
criterion_main!(benches);
