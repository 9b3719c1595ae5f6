use mini_sqlite::codec::{decode, encode, encode_into};
use mini_sqlite::{EMAIL_OFFSET, EMAIL_SIZE, ROW_SIZE, Row, USERNAME_OFFSET, USERNAME_SIZE};
use rand::Rng;
use rand::distributions::Alphanumeric;

fn random_text(rng: &mut impl Rng, max: usize) -> String {
    let len = rng.gen_range(0..=max);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[test]
fn test_layout_is_byte_exact() {
    let row = Row::new(0x0403_0201, "alice", "alice@example.com").unwrap();
    let buf = encode(&row);

    assert_eq!(buf.len(), ROW_SIZE);
    assert_eq!(&buf[0..4], &[0x01, 0x02, 0x03, 0x04]);
    assert_eq!(&buf[4..9], b"alice");
    assert!(buf[9..36].iter().all(|&b| b == 0));
    assert_eq!(&buf[36..53], b"alice@example.com");
    assert!(buf[53..291].iter().all(|&b| b == 0));
}

#[test]
fn test_round_trip() {
    let row = Row::new(1, "alice", "alice@example.com").unwrap();
    assert_eq!(decode(&encode(&row)), row);

    let empty = Row::new(0, "", "").unwrap();
    assert_eq!(decode(&encode(&empty)), empty);
}

#[test]
fn test_round_trip_full_width_fields() {
    // No terminating zero fits in a full column.
    let row = Row::new(u32::MAX, "u".repeat(USERNAME_SIZE), "e".repeat(EMAIL_SIZE)).unwrap();
    let buf = encode(&row);

    assert!(buf[USERNAME_OFFSET..EMAIL_OFFSET].iter().all(|&b| b == b'u'));
    assert!(buf[EMAIL_OFFSET..].iter().all(|&b| b == b'e'));
    assert_eq!(decode(&buf), row);
}

#[test]
fn test_round_trip_multibyte_text() {
    let row = Row::new(5, "żółw", "kröte@example.de").unwrap();
    assert_eq!(decode(&encode(&row)), row);
}

#[test]
fn test_round_trip_random_rows() {
    let mut rng = rand::thread_rng();
    let mut slot = [0u8; ROW_SIZE];

    for _ in 0..500 {
        let row = Row::new(
            rng.r#gen(),
            random_text(&mut rng, USERNAME_SIZE),
            random_text(&mut rng, EMAIL_SIZE),
        )
        .unwrap();

        // Reuse one slot so leftovers from longer rows would show up.
        encode_into(&row, &mut slot);
        assert_eq!(decode(&slot), row);
    }
}

#[test]
fn test_decode_reads_only_first_row_size_bytes() {
    let row = Row::new(9, "nine", "nine@example.com").unwrap();
    let mut buf = vec![0xAAu8; ROW_SIZE + 10];
    encode_into(&row, &mut buf);

    assert_eq!(&buf[ROW_SIZE..], &[0xAA; 10]);
    assert_eq!(decode(&buf), row);
}
