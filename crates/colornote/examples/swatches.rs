use colornote::{Engine, EngineOptions, Notation};

const TOKENS: [&str; 9] = [
    "#000",
    "#3178EA",
    "rgb(255, 0, 0)",
    "rgba(0 128 0 / 0.5)",
    "hsl(300deg 100% 50%)",
    "oklch(70% 0.1 200)",
    "128 128 128",
    "--color-accent",
    "rgb(1, 2",
];

#[allow(clippy::print_stdout)]
fn main() {
    // Run with RUST_LOG=debug to see cache hits, misses, and fallbacks.
    env_logger::init();

    let options = EngineOptions::builder().capacity(TOKENS.len()).build();
    let engine = Engine::with_options(&options);

    for token in TOKENS {
        println!("{}", token);
        for notation in Notation::ALL {
            println!("    {:>5}  {}", notation, engine.convert(token, notation));
        }
    }
}
