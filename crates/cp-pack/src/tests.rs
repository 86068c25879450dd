use crate::*;
use cp_core::{CpError, TableConfig};
use rand::{Rng, SeedableRng};

// ========== Base-N ==========

#[test]
fn test_base_n_binary() {
    let codec = BaseN::new(b"01").unwrap();
    assert_eq!(codec.encode(&[5]), b"101");
}

#[test]
fn test_base_n_decimal() {
    let codec = BaseN::new(b"0123456789").unwrap();
    assert_eq!(codec.encode(&[1, 0]), b"256");
    assert_eq!(codec.encode(&[0xff, 0xff]), b"65535");
    assert_eq!(codec.decode(b"256").unwrap(), vec![1, 0]);
}

#[test]
fn test_base_n_leading_zeros() {
    let codec = BaseN::new(b"0123456789").unwrap();
    assert_eq!(codec.encode(&[0, 0, 1]), b"001");
    assert_eq!(codec.decode(b"001").unwrap(), vec![0, 0, 1]);
    assert_eq!(codec.encode(&[0, 0]), b"00");
    assert_eq!(codec.decode(b"00").unwrap(), vec![0, 0]);
}

#[test]
fn test_base_n_empty() {
    let codec = BaseN::new(b"ab").unwrap();
    assert!(codec.encode(&[]).is_empty());
    assert!(codec.decode(b"").unwrap().is_empty());
}

#[test]
fn test_base_n_rejects_foreign_byte() {
    let codec = BaseN::new(b"0123456789").unwrap();
    let err = codec.decode(b"12x4").unwrap_err();
    assert!(matches!(err, CpError::Encoding(_)));
    assert!(err.to_string().contains("at 2"));
}

#[test]
fn test_base_n_invalid_alphabets() {
    assert!(matches!(BaseN::new(b"a"), Err(CpError::Config(_))));
    assert!(matches!(BaseN::new(b"abca"), Err(CpError::Config(_))));
    let all: Vec<u8> = (0..=255).collect();
    assert_eq!(BaseN::new(&all).unwrap().base(), 256);
}

#[test]
fn test_base_n_full_byte_alphabet_is_identity() {
    let all: Vec<u8> = (0..=255).collect();
    let codec = BaseN::new(&all).unwrap();
    let data = [0u8, 3, 200, 17];
    assert_eq!(codec.encode(&data), data.to_vec());
}

#[test]
fn test_base_n_random_data_pico8() {
    let cfg = TableConfig::pico8();
    let codec = BaseN::new(&cfg.alphabet).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for len in [1usize, 7, 64, 300] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let token = codec.encode(&data);
        assert!(token.iter().all(|b| cfg.alphabet.contains(b)));
        assert_eq!(codec.decode(&token).unwrap(), data);
    }
}

// ========== Deflate ==========

#[test]
fn test_deflate_shrinks_repetitive() {
    let data = "function _draw() cls() end ".repeat(40).into_bytes();
    let compressed = deflate(&data).unwrap();
    assert!(compressed.len() < data.len() / 4);
    assert_eq!(inflate(&compressed).unwrap(), data);
}

#[test]
fn test_inflate_garbage() {
    assert!(inflate(b"definitely not zlib").is_err());
}

// ========== Pack ==========

#[test]
fn test_pack_unpack() {
    let cfg = TableConfig::pico8();
    let data = b"function _update() t+=1 end function _draw() cls() print(t) end".to_vec();
    let packed = pack(&data, &cfg.alphabet).unwrap();
    assert!(packed.token.iter().all(|b| cfg.alphabet.contains(b)));
    assert_eq!(packed.original_len, data.len());
    assert_eq!(unpack(&packed.token, &cfg.alphabet).unwrap(), data);
}

#[test]
fn test_pack_ratio() {
    let cfg = TableConfig::pico8();
    let data = "a=1 ".repeat(200).into_bytes();
    let packed = pack(&data, &cfg.alphabet).unwrap();
    assert!(packed.ratio() < 0.5);
}

#[test]
fn test_pack_bad_alphabet() {
    assert!(pack(b"x", b"z").is_err());
}
