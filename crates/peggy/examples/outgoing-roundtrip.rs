//! Encode a pending withdrawal, print its wire bytes, and decode it back.
//!
//! Logs at TRACE, so the skipped trailing field shows up on stderr.

use peggy::types::peggy_denom;
use peggy::wire::{encode_varint, write_tag, Tag, WireType};
use peggy::{Coin, ERC20Token, Message, OutgoingTx};

const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_target(false)
        .init();

    let token = ERC20Token::new(1_000_000, WETH);
    if let Err(err) = token.validate() {
        eprintln!("invalid token: {err}");
        std::process::exit(1);
    }

    let tx = OutgoingTx {
        sender: "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu".to_string(),
        dest_addr: WETH.as_bytes().to_vec(),
        amount: token.peggy_coin(),
        bridge_fee: Coin::new(peggy_denom(WETH), 10u64),
    };

    let mut wire = tx.encode_to_vec();
    println!("encoded {} bytes:", wire.len());
    for chunk in wire.chunks(16) {
        let line: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!("  {}", line.join(" "));
    }

    // A field from a newer schema revision; older decoders skip it.
    write_tag(Tag::new(5, WireType::Varint), &mut wire);
    encode_varint(1, &mut wire);

    match OutgoingTx::<Coin>::decode(&wire) {
        Ok(decoded) => {
            println!("amount:     {}", decoded.amount);
            println!("bridge fee: {}", decoded.bridge_fee);
            println!("roundtrip:  {}", decoded == tx);
        }
        Err(err) => {
            eprintln!("decode failed: {err}");
            std::process::exit(1);
        }
    }
}
