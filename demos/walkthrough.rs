use clap::Parser;
use prime_probe::HashTable;
use prime_probe::absent;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Number of generated keys inserted after the sample data.
    #[arg(short = 'n', long = "extra_keys", default_value_t = 20)]
    extra_keys: usize,

    /// Log filter, e.g. `prime_probe=debug` to see every resize.
    #[arg(long = "log", default_value = "prime_probe=debug")]
    log: String,
}

fn print_state(table: Option<&HashTable>) {
    println!("   Size: {} items", absent::size(table));
    println!(
        "   Empty: {}",
        if absent::is_empty(table) { "Yes" } else { "No" }
    );
    println!("   Load factor: {:.2}%\n", absent::load_factor(table));
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let mut table = Some(HashTable::new());

    println!("=== Hash Table Demo ===\n");
    println!("1. Initial state:");
    print_state(table.as_ref());

    let sample = [
        ("name", "John"),
        ("age", "30"),
        ("occupation", "Software Engineer"),
        ("country", "USA"),
    ];
    println!("2. Adding key-value pairs:");
    for (key, value) in sample {
        println!("   {} -> {}", key, value);
        absent::insert(table.as_mut(), key, value);
    }
    println!();

    println!("3. After insertion:");
    print_state(table.as_ref());

    println!("4. Searching for values:");
    for (key, _) in sample {
        if let Some(value) = absent::search(table.as_ref(), key) {
            println!("   {}: {}", key, value);
        }
    }
    println!();

    println!("5. Testing contains():");
    for key in ["name", "city"] {
        println!(
            "   Contains '{}': {}",
            key,
            yes_no(absent::contains(table.as_ref(), key))
        );
    }
    println!();

    println!("6. Operating on a missing table:");
    absent::insert(None, "test", "value");
    let found = absent::search(None, "test");
    absent::delete(None, "test");
    println!("   search returned {:?}, nothing else happened\n", found);

    println!("7. Deleting 'age'...");
    absent::delete(table.as_mut(), "age");
    println!("   Size after deletion: {} items", absent::size(table.as_ref()));
    println!(
        "   Contains 'age': {}\n",
        yes_no(absent::contains(table.as_ref(), "age"))
    );

    println!("8. Adding {} more items:", args.extra_keys);
    for i in 0..args.extra_keys {
        absent::insert(table.as_mut(), &format!("key{i}"), &format!("value{i}"));
    }
    if let Some(table) = table.as_ref() {
        println!("   Slots: {} (base size {})", table.capacity(), table.base_size());
    }
    print_state(table.as_ref());

    absent::destroy(table);
}
