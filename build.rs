fn main() {
    // Emits ESP-IDF link/env directives when building for the target;
    // harmless no-op in a host environment without an ESP-IDF install.
    embuild::espidf::sysenv::output();
}
