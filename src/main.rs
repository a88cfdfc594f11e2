
use dynstack::Stack;

fn main() {
  let mut stack = Stack::<i32>::new();
  stack.push(1);
  stack.push(2);
  println!("{}", stack.top());
  let _ = stack.pop();
  println!("{}", stack.top());
  let _ = stack.pop();
  stack.push(2);
  println!("{}", stack.top());
}
