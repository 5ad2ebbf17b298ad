//! Wavelet-packet decomposition
//!
//! Each node of the packet tree is split into an approximation and a detail
//! node by a downsampling convolution with the wavelet's decomposition
//! filters. A node of `n` samples filtered with `F` taps yields
//! `floor((n + F - 1) / 2)` coefficients per child. Boundary samples are
//! taken from the configured extension of the node's signal.

use soilsense_core::{SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// Orthogonal wavelet families supported by the packet transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wavelet {
    /// Haar (db1)
    Haar,
    /// Daubechies, 2 vanishing moments
    Db2,
    /// Daubechies, 3 vanishing moments
    Db3,
}

const HAAR_DEC_LO: [f64; 2] = [0.7071067811865476, 0.7071067811865476];

const DB2_DEC_LO: [f64; 4] = [
    -0.12940952255092145,
    0.22414386804185735,
    0.836516303737469,
    0.48296291314469025,
];

const DB3_DEC_LO: [f64; 6] = [
    0.035226291882100656,
    -0.08544127388224149,
    -0.13501102001039084,
    0.4598775021193313,
    0.8068915093133388,
    0.3326705529509569,
];

impl Wavelet {
    /// Low-pass decomposition filter
    pub fn dec_lo(self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR_DEC_LO,
            Wavelet::Db2 => &DB2_DEC_LO,
            Wavelet::Db3 => &DB3_DEC_LO,
        }
    }

    /// High-pass decomposition filter (quadrature mirror of `dec_lo`)
    pub fn dec_hi(self) -> Vec<f64> {
        let lo = self.dec_lo();
        let taps = lo.len();
        (0..taps)
            .map(|k| {
                let sign = if k % 2 == 0 { -1.0 } else { 1.0 };
                sign * lo[taps - 1 - k]
            })
            .collect()
    }

    pub fn filter_len(self) -> usize {
        self.dec_lo().len()
    }
}

/// How samples beyond the ends of a node are synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionMode {
    /// Half-sample mirror: `... x1 x0 | x0 x1 ... xn-1 | xn-1 xn-2 ...`
    Symmetric,
    /// Zero padding
    Zero,
}

/// Wavelet-packet transform settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveletConfig {
    pub wavelet: Wavelet,
    pub mode: ExtensionMode,
    /// Decomposition depth; the transform yields `2^level` sub-bands
    pub level: usize,
}

impl Default for WaveletConfig {
    fn default() -> Self {
        Self {
            wavelet: Wavelet::Db3,
            mode: ExtensionMode::Symmetric,
            level: 4,
        }
    }
}

/// Wavelet-packet decomposer
#[derive(Debug, Clone)]
pub struct WaveletPacket {
    config: WaveletConfig,
    dec_hi: Vec<f64>,
}

impl WaveletPacket {
    pub fn new(config: WaveletConfig) -> Self {
        WaveletPacket {
            config,
            dec_hi: config.wavelet.dec_hi(),
        }
    }

    pub fn config(&self) -> &WaveletConfig {
        &self.config
    }

    /// Coefficients per child for a node of `n` samples
    pub fn coeff_len(&self, n: usize) -> usize {
        (n + self.config.wavelet.filter_len() - 1) / 2
    }

    /// `(sub-bands, coefficients per band)` for an input of `n` samples
    pub fn output_shape(&self, n: usize) -> (usize, usize) {
        let coefs = (0..self.config.level).fold(n, |len, _| self.coeff_len(len));
        (1 << self.config.level, coefs)
    }

    /// Single-level transform: `(approximation, detail)`
    pub fn dwt(&self, signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let approx = self.downsample_convolve(signal, self.config.wavelet.dec_lo());
        let detail = self.downsample_convolve(signal, &self.dec_hi);
        (approx, detail)
    }

    /// Leaf sub-bands at the configured depth, lowest frequency first
    pub fn decompose(&self, signal: &[f64]) -> SoilResult<Vec<Vec<f64>>> {
        if signal.is_empty() {
            return Err(SoilError::InvalidSignalData {
                reason: "Cannot decompose an empty signal".to_string(),
            });
        }

        // Natural order: children of node i are 2i (approximation) and 2i + 1 (detail)
        let mut nodes = vec![signal.to_vec()];
        for _ in 0..self.config.level {
            let mut next = Vec::with_capacity(nodes.len() * 2);
            for node in &nodes {
                let (approx, detail) = self.dwt(node);
                next.push(approx);
                next.push(detail);
            }
            nodes = next;
        }

        // Detail branches mirror the spectrum, so frequency order is Gray-code order
        let mut ordered = Vec::with_capacity(nodes.len());
        for k in 0..nodes.len() {
            ordered.push(std::mem::take(&mut nodes[k ^ (k >> 1)]));
        }
        Ok(ordered)
    }

    fn downsample_convolve(&self, signal: &[f64], filter: &[f64]) -> Vec<f64> {
        let out_len = self.coeff_len(signal.len());
        (0..out_len)
            .map(|o| {
                let i = (2 * o + 1) as isize;
                filter.iter()
                    .enumerate()
                    .map(|(j, &tap)| tap * self.sample(signal, i - j as isize))
                    .sum()
            })
            .collect()
    }

    fn sample(&self, signal: &[f64], k: isize) -> f64 {
        let n = signal.len() as isize;
        if (0..n).contains(&k) {
            return signal[k as usize];
        }
        match self.config.mode {
            ExtensionMode::Zero => 0.0,
            ExtensionMode::Symmetric => {
                let m = k.rem_euclid(2 * n);
                let index = if m < n { m } else { 2 * n - 1 - m };
                signal[index as usize]
            }
        }
    }
}

impl Default for WaveletPacket {
    fn default() -> Self {
        Self::new(WaveletConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haar(level: usize) -> WaveletPacket {
        WaveletPacket::new(WaveletConfig {
            wavelet: Wavelet::Haar,
            mode: ExtensionMode::Symmetric,
            level,
        })
    }

    #[test]
    fn test_quadrature_mirror_filters() {
        for wavelet in [Wavelet::Haar, Wavelet::Db2, Wavelet::Db3] {
            let lo = wavelet.dec_lo();
            let hi = wavelet.dec_hi();

            // Unit energy, lowpass sums to sqrt(2), highpass sums to zero
            let energy: f64 = lo.iter().map(|c| c * c).sum();
            assert!((energy - 1.0).abs() < 1e-9, "{:?}", wavelet);
            assert!((lo.iter().sum::<f64>() - 2.0f64.sqrt()).abs() < 1e-9);
            assert!(hi.iter().sum::<f64>().abs() < 1e-9);
        }

        let hi = Wavelet::Db3.dec_hi();
        assert!((hi[0] + 0.3326705529509569).abs() < 1e-15);
        assert!((hi[5] - 0.035226291882100656).abs() < 1e-15);
    }

    #[test]
    fn test_haar_single_level() {
        let (approx, detail) = haar(1).dwt(&[1.0, 3.0, 5.0, 7.0]);
        let s = std::f64::consts::SQRT_2;

        assert_eq!(approx.len(), 2);
        assert!((approx[0] - 4.0 / s).abs() < 1e-12);
        assert!((approx[1] - 12.0 / s).abs() < 1e-12);
        assert!((detail[0] + 2.0 / s).abs() < 1e-12);
        assert!((detail[1] + 2.0 / s).abs() < 1e-12);
    }

    #[test]
    fn test_default_shape_for_event_window() {
        let packet = WaveletPacket::default();
        assert_eq!(packet.output_shape(96), (16, 10));

        let signal: Vec<f64> = (0..96).map(|i| (i as f64 * 0.3).sin()).collect();
        let bands = packet.decompose(&signal).unwrap();
        assert_eq!(bands.len(), 16);
        assert!(bands.iter().all(|band| band.len() == 10));
    }

    #[test]
    fn test_constant_signal_stays_in_lowest_band() {
        let packet = WaveletPacket::default();
        let bands = packet.decompose(&[2.5; 96]).unwrap();

        // Lowpass gain is sqrt(2) per level
        assert!(bands[0].iter().all(|&c| (c - 2.5 * 4.0).abs() < 1e-6));
        for band in &bands[1..] {
            assert!(band.iter().all(|c| c.abs() < 1e-6));
        }
    }

    #[test]
    fn test_bands_are_frequency_ordered() {
        // Alternating sign is the highest representable frequency
        let signal: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let bands = haar(2).decompose(&signal).unwrap();
        let energy: Vec<f64> = bands.iter()
            .map(|band| band.iter().map(|c| c * c).sum())
            .collect();

        let loudest = energy.iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(loudest, Some(3));
    }

    #[test]
    fn test_haar_preserves_energy_on_even_lengths() {
        let signal: Vec<f64> = (0..32).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let bands = haar(3).decompose(&signal).unwrap();

        let input: f64 = signal.iter().map(|v| v * v).sum();
        let output: f64 = bands.iter().flatten().map(|c| c * c).sum();
        assert!((input - output).abs() < 1e-9);
    }

    #[test]
    fn test_zero_extension_and_empty_input() {
        let packet = WaveletPacket::new(WaveletConfig {
            wavelet: Wavelet::Db2,
            mode: ExtensionMode::Zero,
            level: 1,
        });
        let (approx, _) = packet.dwt(&[1.0]);
        // Only x[0] contributes, through tap 1
        assert_eq!(approx.len(), 2);
        assert!((approx[0] - DB2_DEC_LO[1]).abs() < 1e-15);

        assert!(packet.decompose(&[]).is_err());
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-8, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn test_db2_symmetric_reference_values() {
        let packet = WaveletPacket::new(WaveletConfig {
            wavelet: Wavelet::Db2,
            mode: ExtensionMode::Symmetric,
            level: 1,
        });
        let (approx, detail) = packet.dwt(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_close(&approx, &[1.76776695, 2.31078903, 5.13921616, 8.13172798]);
        assert_close(&detail, &[-0.61237244, 0.0, 0.0, 0.61237244]);
    }

    #[test]
    fn test_db3_symmetric_level_two_reference_values() {
        let packet = WaveletPacket::new(WaveletConfig {
            wavelet: Wavelet::Db3,
            mode: ExtensionMode::Symmetric,
            level: 2,
        });
        let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let (approx, detail) = packet.dwt(&signal);
        assert_close(&approx, &[4.52111203, 1.54666942, 2.57019338, 5.39862050, 8.20681003, 11.18125264]);
        assert_close(&detail, &[-0.19112015, 0.19112015, 0.0, 0.0, 0.19112015, -0.19112015]);

        // Frequency order: aa, ad, dd, da
        let bands = packet.decompose(&signal).unwrap();
        assert_close(&bands[0], &[3.63890166, 6.00349136, 2.89780988, 6.80941869, 15.41549196]);
        assert_close(&bands[1], &[1.25531439, -0.60300027, 0.36403471, 0.59368086, -0.53821027]);
        assert_close(&bands[2], &[-0.15570474, -0.07168563, 0.22739037, -0.15570474, -0.07168563]);
        assert_close(&bands[3], &[0.13675719, -0.20432836, 0.06757118, 0.13675719, -0.20432836]);
    }
}
