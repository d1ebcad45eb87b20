use super::GaloisField;

// Rectifier
//------------------------------------------------------------------------------

/// Corrects `codewords` in place, the last `ecc_count` of which are error correction
/// words. Returns the number of corrected words, or `None` when the errors exceed the
/// capacity of the code.
pub fn rectify(codewords: &mut [u16], ecc_count: usize, gf: &GaloisField) -> Option<usize> {
    let len = codewords.len();

    // Compute syndromes
    let synd = syndromes(codewords, ecc_count, gf);
    if synd.iter().all(|&s| s == 0) {
        return Some(0);
    }

    // Error locator polynomial
    let (sig, deg) = berlekamp_massey(&synd, gf);

    // Sigma derivative
    let mut dsig = vec![0; sig.len()];
    for i in (1..sig.len()).step_by(2) {
        dsig[i - 1] = sig[i];
    }

    // Error evaluator
    let omg = omega(&synd, &sig, gf);

    // Chien search & Forney
    let order = gf.size() - 1;
    let mut count = 0;
    for p in 0..len {
        let xinv = gf.exp(order - p % order);
        if eval_poly(&sig, xinv, gf) != 0 {
            continue;
        }
        count += 1;
        let mag = gf.div(eval_poly(&omg, xinv, gf), eval_poly(&dsig, xinv, gf));
        codewords[len - 1 - p] ^= mag;
    }

    if count != deg || syndromes(codewords, ecc_count, gf).iter().any(|&s| s != 0) {
        return None;
    }
    Some(count)
}

fn syndromes(codewords: &[u16], ecc_count: usize, gf: &GaloisField) -> Vec<u16> {
    (1..=ecc_count)
        .map(|j| {
            let x = gf.exp(j);
            codewords.iter().fold(0, |acc, &c| gf.mul(acc, x) ^ c)
        })
        .collect()
}

// Sigma polynomial, lowest degree first, and its degree
fn berlekamp_massey(synd: &[u16], gf: &GaloisField) -> (Vec<u16>, usize) {
    let n = synd.len();
    let mut l = 0usize;
    let mut m = 1usize;
    let mut b = 1u16;
    let mut cx = vec![0u16; n + 1];
    let mut bx = vec![0u16; n + 1];
    cx[0] = 1;
    bx[0] = 1;

    for k in 0..n {
        // Calculate discrepancy
        let mut d = synd[k];
        for i in 1..=l {
            d ^= gf.mul(cx[i], synd[k - i]);
        }

        if d == 0 {
            m += 1;
            continue;
        }

        let tx = cx.clone();
        let scale = gf.div(d, b);
        for i in 0..=n - m {
            cx[i + m] ^= gf.mul(scale, bx[i]);
        }

        if 2 * l <= k {
            bx = tx;
            l = k + 1 - l;
            b = d;
            m = 1;
        } else {
            m += 1;
        }
    }
    (cx, l)
}

// Error evaluator polynomial
fn omega(synd: &[u16], sig: &[u16], gf: &GaloisField) -> Vec<u16> {
    let n = synd.len();
    let mut omg = vec![0; n];
    for (i, o) in omg.iter_mut().enumerate() {
        for j in 0..=i {
            *o ^= gf.mul(synd[j], sig[i - j]);
        }
    }
    omg
}

// Lowest degree first
fn eval_poly(poly: &[u16], x: u16, gf: &GaloisField) -> u16 {
    poly.iter().rev().fold(0, |acc, &c| gf.mul(acc, x) ^ c)
}

#[cfg(test)]
mod ec_rectifier_tests {
    use test_case::test_case;

    use super::rectify;
    use crate::common::ec::{ecc, GaloisField};

    fn codewords(word_size: usize, data_len: usize, ecc_count: usize) -> Vec<u16> {
        let gf = GaloisField::for_word_size(word_size);
        let data = (0..data_len).map(|i| ((i * 29 + 7) % gf.size()) as u16).collect::<Vec<_>>();
        let mut cw = data.clone();
        cw.extend(ecc(&data, ecc_count, gf));
        cw
    }

    #[test_case(4, 2, 5, &[0, 3])]
    #[test_case(6, 14, 26, &[0, 5, 13, 20, 39])]
    #[test_case(8, 50, 20, &[1, 2, 3, 4, 5, 60, 61, 62, 63, 69])]
    #[test_case(10, 100, 30, &[0, 99, 100, 129])]
    #[test_case(12, 200, 40, &[7, 150, 239])]
    fn test_rectifier(word_size: usize, data_len: usize, ecc_count: usize, errs: &[usize]) {
        let gf = GaloisField::for_word_size(word_size);
        let orig = codewords(word_size, data_len, ecc_count);
        let mut bad = orig.clone();
        for (k, &p) in errs.iter().enumerate() {
            bad[p] ^= (k as u16 % (gf.size() as u16 - 1)) + 1;
        }
        assert_eq!(rectify(&mut bad, ecc_count, gf), Some(errs.len()));
        assert_eq!(bad, orig);
    }

    #[test]
    fn test_rectifier_clean() {
        let gf = GaloisField::for_word_size(6);
        let mut cw = codewords(6, 10, 11);
        assert_eq!(rectify(&mut cw, 11, gf), Some(0));
    }

    #[test]
    fn test_rectifier_fail() {
        let gf = GaloisField::for_word_size(4);
        let orig = codewords(4, 2, 5);
        let mut bad = orig.clone();
        for p in 0..4 {
            bad[p] ^= 0b1010;
        }
        assert_eq!(rectify(&mut bad, 5, gf), None);
    }
}
