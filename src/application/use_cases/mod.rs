pub mod generate_dump_script;
