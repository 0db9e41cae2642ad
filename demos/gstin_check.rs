use gst_invoicing::gst::*;
use rust_decimal_macros::dec;

fn main() {
    println!("=== GSTIN Validation ===\n");

    let test_ids = [
        "27AAPFU0939F1ZV",
        "29aagcb7383j1z4", // lowercase is normalized
        "33AAACH7409R1Z8",
        "27AAPFU0939F1Z1", // wrong check character
        "25AAPFU0939F1ZV", // unknown state
        "27AAPFU0939F1Z",  // too short
    ];

    for id in &test_ids {
        match validate_gstin(id) {
            Ok(gstin) => println!(
                "  {id} => valid ({}, PAN {})",
                gstin.state_name().unwrap_or("?"),
                gstin.pan()
            ),
            Err(e) => println!("  {id} => INVALID: {}", e.reason),
        }
    }

    println!("\n=== Tax Split ===\n");

    let tax = dec!(1800);
    for (seller, buyer) in [("27", "27"), ("27", "29")] {
        let kind = supply_kind(seller, buyer);
        let split = split_tax(tax, kind);
        println!(
            "  {seller} -> {buyer}: {kind:?}  CGST {} SGST {} IGST {}",
            split.cgst, split.sgst, split.igst
        );
    }
}
