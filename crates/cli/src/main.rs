mod app;

use app::ChessApp;

fn main() {
    if let Err(e) = ChessApp::new().run() {
        eprintln!("fatal: {}", e);
        std::process::exit(1);
    }
}
