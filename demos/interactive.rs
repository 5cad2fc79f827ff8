//! An interactive front end: allocate and release blocks from the terminal.

extern crate buddy_tree;
extern crate log;

use std::error::Error;
use std::io::{self, BufRead, Write};

use buddy_tree::sys::Region;
use buddy_tree::{write, Address, Allocator};

/// The number of addresses that can be remembered.
const SLOTS: usize = 16;

/// Prompt, and read an integer. `None` on end of input.
fn ask(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> io::Result<Option<i64>> {
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        match lines.next() {
            None => return Ok(None),
            Some(line) => match line?.trim().parse() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => println!("Invalid value."),
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    write::init(log::LevelFilter::Debug).map_err(|err| err.to_string())?;

    let mut region = Region::reserve(1 << 20)?;
    let mut alloc = Allocator::with_defaults(&mut region)?;
    let mut slots: [Option<Address>; SLOTS] = [None; SLOTS];

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", alloc.dump());

        let action = ask(
            &mut lines,
            "Enter a negative number to exit, 0 to allocate memory, 1 to release memory: ",
        )?;
        match action {
            None => break,
            Some(n) if n < 0 => break,
            Some(0) => {
                let capacity = alloc.capacity();
                let prompt = format!("Enter number of bytes to allocate (1 to {}): ", capacity);
                let size = match ask(&mut lines, &prompt)? {
                    Some(size) => size,
                    None => break,
                };
                let size = match usize::try_from(size) {
                    Ok(size) if (1..=capacity).contains(&size) => size,
                    _ => {
                        println!("Invalid value.");
                        continue;
                    }
                };
                let Some(slot) = slots.iter().position(Option::is_none) else {
                    println!("All {} slots are taken. Release something first.", SLOTS);
                    continue;
                };

                match alloc.allocate(&vec![0xA5; size]) {
                    Ok(addr) => {
                        slots[slot] = Some(addr);
                        println!("Allocated {} bytes at {}, saved in slot {}.", size, addr, slot);
                    }
                    Err(err) => println!("Allocation failed: {}.", err),
                }
            }
            Some(1) => {
                let taken: Vec<String> = slots
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.is_some())
                    .map(|(n, _)| n.to_string())
                    .collect();
                if taken.is_empty() {
                    println!("Oops! The memory is empty.");
                    continue;
                }

                let prompt = format!("Enter slot to release ({}): ", taken.join(", "));
                let slot = match ask(&mut lines, &prompt)? {
                    Some(slot) => slot,
                    None => break,
                };
                let addr = usize::try_from(slot)
                    .ok()
                    .and_then(|n| slots.get_mut(n))
                    .and_then(Option::take);
                match addr {
                    Some(addr) => match alloc.release(addr) {
                        Ok(size) => println!("Released {} bytes at {}.", size, addr),
                        Err(err) => println!("Release failed: {}.", err),
                    },
                    None => println!("Slot {} holds nothing.", slot),
                }
            }
            Some(_) => println!("Invalid value."),
        }
    }

    Ok(())
}
