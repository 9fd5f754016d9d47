use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn sample_table() -> me_tlk::TlkStringTable {
    const WORDS: &[&str] = &[
        "commander", "normandy", "citadel", "reaper", "paragon", "renegade", "galaxy", "relay",
    ];

    let mut table = me_tlk::TlkStringTable {
        version: 3,
        min_version: 2,
        ..Default::default()
    };

    for i in 0..1000u32 {
        let mut text = String::new();
        for j in 0..(i % 12 + 1) {
            text.push_str(WORDS[((i + j) % WORDS.len() as u32) as usize]);
            text.push(' ');
        }
        table
            .male
            .insert(i, widestring::U16String::from_str(&text));
        table
            .female
            .insert(i, widestring::U16String::from_str(&text));
    }

    table
}

fn get_input() -> Vec<u8> {
    me_tlk::TlkWriter::from_table(std::io::Cursor::new(Vec::new()), &sample_table())
        .unwrap()
        .finish()
        .unwrap()
        .into_inner()
}

pub mod read {
    use divan::Bencher;
    use std::io::Cursor;

    use me_tlk::TlkDocument;

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_refs(|data| {
            divan::black_box(TlkDocument::new(Cursor::new(data)).unwrap());
        });
    }

    #[divan::bench]
    fn decode_all(bencher: Bencher) {
        bencher
            .with_inputs(|| TlkDocument::parse(&super::get_input()).unwrap())
            .bench_refs(|tlk| {
                divan::black_box(tlk.decode_all());
            });
    }
}

pub mod write {
    use divan::Bencher;
    use std::io::Cursor;

    use me_tlk::TlkWriter;

    #[divan::bench]
    fn finish(bencher: Bencher) {
        bencher.with_inputs(super::sample_table).bench_values(|table| {
            let writer = TlkWriter::from_table(Cursor::new(Vec::new()), &table).unwrap();
            divan::black_box(writer.finish().unwrap());
        });
    }
}
