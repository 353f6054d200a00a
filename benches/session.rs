#[macro_use]
extern crate bencher;

use bencher::Bencher;
use osrp::{SrpClient, SrpServer, G_3072};

struct Session {
    client: SrpClient<'static>,
    a_pub: String,
    session: osrp::ClientSession,
    good_proof: String,
    bad_proof: String,
}

fn session_fixture() -> Session {
    let client = SrpClient::new(&G_3072);
    let server = SrpServer::new(&G_3072, 60_000, 100);

    let salt = client.generate_salt();
    let sk = client.derive_private_key(&salt, "bench", "password").unwrap();
    let v_prime = client.derive_private_verifier(&sk).unwrap();
    let (state, request) = client.blind_oprf_input(&v_prime).unwrap();
    let response = server.perform_oprf_eval("bench", &request).unwrap();
    let output = client.finalize_oprf(state, &response).unwrap();
    let x = client
        .derive_verifier_hash(&[&hex::encode(&v_prime), &output])
        .unwrap();
    let v = client.derive_public_verifier(&x).unwrap();

    let client_eph = client.generate_ephemeral();
    let server_eph = server.generate_ephemeral(&v).unwrap();
    let session = client
        .derive_session(&client_eph.secret, &server_eph.public, &salt, "bench", &x)
        .unwrap();
    let server_session = server
        .derive_session(
            &server_eph.secret,
            &client_eph.public,
            &salt,
            "bench",
            &v,
            &session.proof,
        )
        .unwrap();

    // A forged proof differing in its first byte, so any early-exit
    // comparison would return fastest on it.
    let mut bad_proof = server_session.proof.clone();
    let flipped = if bad_proof.starts_with('0') { "1" } else { "0" };
    bad_proof.replace_range(0..1, flipped);

    Session {
        client,
        a_pub: client_eph.public,
        session,
        good_proof: server_session.proof,
        bad_proof,
    }
}

// The two timings below should be indistinguishable beyond noise: the
// proof comparison must not leak where a mismatch occurs.

fn verify_matching_proof(bench: &mut Bencher) {
    let s = session_fixture();
    bench.iter(|| s.client.verify_session(&s.a_pub, &s.session, &s.good_proof));
}

fn verify_mismatched_proof(bench: &mut Bencher) {
    let s = session_fixture();
    bench.iter(|| s.client.verify_session(&s.a_pub, &s.session, &s.bad_proof));
}

fn derive_session(bench: &mut Bencher) {
    let client = SrpClient::new(&G_3072);
    let server = SrpServer::new(&G_3072, 60_000, 100);
    let salt = client.generate_salt();
    let x = client.derive_private_key(&salt, "bench", "password").unwrap();
    let v = client.derive_public_verifier(&x).unwrap();
    let client_eph = client.generate_ephemeral();
    let server_eph = server.generate_ephemeral(&v).unwrap();
    bench.iter(|| {
        client
            .derive_session(&client_eph.secret, &server_eph.public, &salt, "bench", &x)
            .unwrap()
    });
}

benchmark_group!(
    benches,
    verify_matching_proof,
    verify_mismatched_proof,
    derive_session
);
benchmark_main!(benches);
