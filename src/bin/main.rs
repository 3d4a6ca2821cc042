fn main() {
  inscription_rpc::main()
}
