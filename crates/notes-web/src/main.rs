fn main() {
    notes_web::main();
}
