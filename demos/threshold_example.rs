use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::fmt;

use tbls::{
    recover_secret, ByteEncoding, CurvePoint, G1Scheme, PairingEngine, PrivatePoly, SchemeConfig,
    SignatureGroup, SignatureScheme, ThresholdParameters, ThresholdSigner,
};

const PARTIES: usize = 7;
const THRESHOLD: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = StdRng::seed_from_u64(42);

    let params = ThresholdParameters::new(PARTIES, THRESHOLD, SchemeConfig::new(SignatureGroup::G1))?;
    let signer = ThresholdSigner::new(G1Scheme::<PairingEngine>::from_config(&params.scheme)?);

    info!(
        parties = PARTIES,
        threshold = THRESHOLD,
        "starting threshold signing example"
    );

    // Dealer samples the polynomial and hands out shares
    let poly = PrivatePoly::new(THRESHOLD, None, &mut rng)?;
    let public_poly = poly.commit(&signer.scheme().public_base());
    let shares = poly.shares(PARTIES)?;

    for share in &shares {
        if !public_poly.check(share) {
            warn!(index = share.index, "share does not match the commitment");
        }
    }

    let secret = recover_secret(&shares[PARTIES - THRESHOLD..], THRESHOLD, PARTIES)?;
    info!(matches = (secret == poly.secret()), "secret reconstructed from the last shares");

    let message = b"release 1.4.2";

    // Every holder signs, and holder 1 sends garbage
    let mut partials = shares
        .iter()
        .map(|share| signer.partial_sign(share, message))
        .collect::<Result<Vec<_>, _>>()?;
    partials[1].value = CurvePoint::negate(&partials[1].value);

    let recovery = signer.recover(&public_poly, message, &partials, THRESHOLD, PARTIES)?;
    info!(
        used = ?recovery.used,
        rejected = ?recovery.rejected,
        "threshold signature recovered"
    );

    signer.verify(&public_poly.commit(), message, &recovery.signature)?;
    info!(
        bytes = ByteEncoding::to_bytes(&recovery.signature).len(),
        "signature verifies under the group public key"
    );

    // Same flow through a session that collects shares one by one
    let mut session = signer.session(public_poly.clone(), message.to_vec(), THRESHOLD, PARTIES)?;
    for share in shares.iter().rev().take(THRESHOLD) {
        session.sign_with(share)?;
    }
    let from_session = session.finalize()?;
    info!(
        state = ?session.state(),
        same_signature = (from_session.signature == recovery.signature),
        "session finished"
    );

    Ok(())
}
