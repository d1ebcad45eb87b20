use super::GaloisField;

// ECC: Error correction codeword generator
//------------------------------------------------------------------------------

/// Monic generator polynomial with roots a^1 to a^n, coefficients from the highest
/// degree down.
pub fn generator_poly(ecc_count: usize, gf: &GaloisField) -> Vec<u16> {
    let mut poly = Vec::with_capacity(ecc_count + 1);
    poly.push(1);
    for d in 1..=ecc_count {
        let root = gf.exp(d);
        poly.push(0);
        for i in (1..poly.len()).rev() {
            poly[i] ^= gf.mul(poly[i - 1], root);
        }
    }
    poly
}

// Performs polynomial long division of the data polynomial by the generator
// polynomial. Coefficients of the remainder are the ecc.
pub fn ecc(data: &[u16], ecc_count: usize, gf: &GaloisField) -> Vec<u16> {
    let len = data.len();
    let gen_poly = generator_poly(ecc_count, gf);

    let mut res = data.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }

        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly[1..].iter()) {
            *u ^= gf.mul(v, lead_coeff);
        }
    }

    res.split_off(len)
}
