/// Dump the events of a QSH file to stdout.
///
/// Usage: cargo run --example dump_events -- <path.qsh[.gz]>

use qsh_decoder::{DecodeError, Record};

fn main() -> Result<(), DecodeError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: dump_events <path.qsh[.gz]>");
        std::process::exit(2);
    });

    let mut reader = qsh_decoder::open(&path)?;

    println!(
        "{} v{} | app: {} | {} streams",
        path,
        reader.header().version,
        reader.header().application,
        reader.header().streams_count
    );
    for desc in reader.streams() {
        println!(
            "  [{}] {:?} {}",
            desc.stream_index,
            desc.stream_type,
            desc.instrument.as_deref().unwrap_or("-")
        );
    }

    while let Some(event) = reader.next_event()? {
        match &event.record {
            Record::OrdLog(record) => {
                if let Some(entry) = &record.order_log {
                    println!(
                        "{} [{}] ordlog id={} price={} amount={} actions={:#06x}",
                        event.timestamp,
                        event.stream_index,
                        entry.order_id,
                        entry.price,
                        entry.amount,
                        entry.actions
                    );
                }
                if let Some(deal) = &record.deal {
                    println!(
                        "{} [{}] deal id={} price={} volume={}",
                        event.timestamp, event.stream_index, deal.id, deal.price, deal.volume
                    );
                }
            }
            Record::Deal(deal) => println!(
                "{} [{}] deal id={} price={} volume={}",
                event.timestamp, event.stream_index, deal.id, deal.price, deal.volume
            ),
            Record::Quotes(updates) => println!(
                "{} [{}] quotes: {} updates",
                event.timestamp,
                event.stream_index,
                updates.len()
            ),
            Record::Message(msg) => println!(
                "{} [{}] message: {}",
                event.timestamp, event.stream_index, msg.text
            ),
            other => println!("{} [{}] {:?}", event.timestamp, event.stream_index, other),
        }
    }

    println!("---");
    println!("{} frames total", reader.stats().total_frames());
    for desc in reader.streams() {
        if let Some(book) = reader.book(desc.stream_index) {
            if !book.is_empty() {
                println!(
                    "  [{}] book: {} levels, best bid {:?}, best ask {:?}",
                    desc.stream_index,
                    book.len(),
                    book.best_bid(),
                    book.best_ask()
                );
            }
        }
    }

    Ok(())
}
