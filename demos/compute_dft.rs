//! Example: Discrete Fourier transform of a short fixed signal

use wavedraw::compute_dft;

fn main() {
    env_logger::init();

    let signal = [
        1.00, 0.62, -0.07, -0.87, -1.51, -1.81, -1.70, -1.24, -0.64, -0.15, 0.05, -0.10,
    ];
    let spectrum = compute_dft(&signal);

    for (i, (bin, value)) in spectrum.iter().zip(signal.iter()).enumerate() {
        let (operator, imaginary) = if bin.imag <= 0.0 {
            ('+', -bin.imag)
        } else {
            ('-', bin.imag)
        };
        println!(
            "Signal index: {}, signal value: {}, result: {:.3} {} {:.3}j",
            i, value, bin.real, operator, imaginary
        );
    }
}
