use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::fmt;

use tbls::dkg::Participant;
use tbls::{G2Scheme, PairingEngine, SignatureScheme, ThresholdSigner};

const PARTIES: usize = 5;
const THRESHOLD: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = ChaCha20Rng::seed_from_u64(7);

    // Short public keys: signatures in G2, keys in G1
    let signer = ThresholdSigner::new(G2Scheme::<PairingEngine>::new());
    let base = signer.scheme().public_base();

    info!(
        parties = PARTIES,
        threshold = THRESHOLD,
        "starting distributed key generation"
    );

    let mut parties = (0..PARTIES as u32)
        .map(|i| Participant::new(i, THRESHOLD, PARTIES, base, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    // Each deal would travel over private channels; here everyone sees all of them
    let deals = parties
        .iter()
        .map(|p| p.deal())
        .collect::<Result<Vec<_>, _>>()?;
    for deal in &deals {
        for party in parties.iter_mut() {
            party.receive_deal(deal)?;
        }
    }

    let keys = parties
        .into_iter()
        .map(|p| p.finalize())
        .collect::<Result<Vec<_>, _>>()?;
    let public_key = keys[0].public_key();
    info!(
        agreed = keys.iter().all(|k| k.public_key() == public_key),
        "joint public key derived"
    );

    let message = b"committee vote 18";
    let partials = keys
        .iter()
        .skip(1)
        .take(THRESHOLD)
        .map(|k| signer.partial_sign(&k.share, message))
        .collect::<Result<Vec<_>, _>>()?;

    let recovery = signer.recover(&keys[0].public_poly, message, &partials, THRESHOLD, PARTIES)?;
    signer.verify(&public_key, message, &recovery.signature)?;
    info!(used = ?recovery.used, "threshold signature verifies under the joint key");

    Ok(())
}
