fn main() {
    arena_survival::game::run();
}
